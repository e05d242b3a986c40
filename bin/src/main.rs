//! feedscope CLI - Historical API3 oracle feed reader.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use feedscope_lib::QueryForm;
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "feedscope")]
#[command(about = "Read historical API3 oracle feed values", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and non-error logs)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a feed across a block or date range
    Query {
        /// Chain ID (e.g., 56 for BNB Smart Chain)
        #[arg(short, long)]
        chain: Option<String>,

        /// Feed name (e.g., ETH/USD)
        #[arg(long)]
        feed: Option<String>,

        /// First block to sample
        #[arg(long)]
        start_block: Option<String>,

        /// Last block to sample
        #[arg(long)]
        end_block: Option<String>,

        /// Start date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        start_date: Option<String>,

        /// End date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        end_date: Option<String>,

        /// Blocks between samples. Defaults to 1000.
        #[arg(long, allow_hyphen_values = true)]
        step: Option<String>,

        /// RPC endpoint, overriding the chain's default
        #[arg(long, env = "FEEDSCOPE_RPC_URL")]
        rpc_url: Option<String>,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// Maximum concurrent block reads
        #[arg(long, default_value = "1")]
        concurrency: usize,
    },

    /// List chains with a known oracle deployment
    Chains {
        /// Show testnets only
        #[arg(long)]
        testnets: bool,

        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show chain details and current block height
    Info {
        /// Chain ID
        chain: String,

        /// RPC endpoint, overriding the chain's default
        #[arg(long, env = "FEEDSCOPE_RPC_URL")]
        rpc_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Query {
            chain,
            feed,
            start_block,
            end_block,
            start_date,
            end_date,
            step,
            rpc_url,
            output,
            format,
            concurrency,
        } => {
            let form = QueryForm {
                chain_id: chain,
                feed_name: feed,
                start_block,
                end_block,
                start_date,
                end_date,
                step,
                rpc_url,
            };
            commands::query::query(&form, output, format, concurrency, cli.quiet).await
        }
        Commands::Chains { testnets, search } => {
            commands::chains::list_chains(testnets, search.as_deref())
        }
        Commands::Info { chain, rpc_url } => {
            commands::info::show_info(&chain, rpc_url.as_deref()).await
        }
    }
}
