//! Info command implementation.
//!
//! This module displays a chain's directory entry and, when the chain is
//! reachable, its current block height.

use crate::display::or_dash;
use anyhow::{Context, Result};
use feedscope_lib::lookup_endpoint;
use feedscope_lib::prelude::*;

/// Show the directory entry for a chain and its latest block.
pub(crate) async fn show_info(chain_id: &str, rpc_override: Option<&str>) -> Result<()> {
    let registry = ChainRegistry::global();
    let chain = registry
        .get(chain_id)
        .with_context(|| format!("Unknown chain: {chain_id}"))?;

    println!("Chain:    {}", chain.name());
    println!("ID:       {}", chain.id());
    println!("Testnet:  {}", if chain.is_testnet() { "yes" } else { "no" });
    println!("RPC:      {}", or_dash(chain.rpc_url()));
    println!("Contract: {}", or_dash(chain.contract_address()));

    let endpoint = match lookup_endpoint(registry, chain.id(), rpc_override) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            println!("\n{e}");
            return Ok(());
        }
    };

    let client = OracleClient::with_defaults(&endpoint)?;
    let height = client
        .current_height()
        .await
        .with_context(|| format!("Failed to fetch block height from {}", endpoint.rpc_url))?;
    println!("Latest Block: {height}");

    Ok(())
}
