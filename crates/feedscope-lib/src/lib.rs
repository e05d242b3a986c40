//! Library for reading historical API3 oracle feed values.
//!
//! This is a facade crate that re-exports functionality from the feedscope
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use feedscope_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = QueryEngine::new(
//!         ChainRegistry::global(),
//!         HttpConnector::default(),
//!         EngineConfig::default(),
//!     );
//!
//!     let request = QueryRequest::blocks("56", "ETH/USD", 30_000_000, 30_005_000, 1000);
//!     let report = engine.run(&request).await?;
//!
//!     for observation in report.series.observations() {
//!         println!("{} {}", observation.block_number, observation.value);
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/feedscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use feedscope_types::*;

// Re-export chain directory
pub use feedscope_chains::{ChainDirectory, ChainRegistry};

// Re-export RPC access
pub use feedscope_rpc::{ClientConfig, Connector, HttpConnector, OracleClient, OracleRpc};

// Re-export the engine
pub use feedscope_engine::{
    CheckedBounds, CheckedInput, EngineConfig, PreparedQuery, QueryEngine, QueryReport,
    QuerySession, QuerySlot, QueryTicket, ResolverConfig, SamplerConfig, SlotResult,
    block_at_timestamp, blocks_for_dates, check_input, lookup_endpoint, prepare_query,
    resolve_feed_identifier, resolve_range, run_query, sample_range, sample_range_with_progress,
};

#[cfg(feature = "testing")]
pub use feedscope_engine::testing;

// Re-export formatters
#[cfg(feature = "format")]
pub use feedscope_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, TableFormatter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use feedscope_lib::prelude::*;
/// ```
pub mod prelude {
    pub use feedscope_types::{
        Chain, Endpoint, ErrorKind, FeedIdentifier, FeedName, Observation, QueryError,
        QueryForm, QueryRequest, RangeBounds, ResolvedRange, ResultSeries, RpcError,
        SampleOutcome,
    };

    pub use feedscope_chains::{ChainDirectory, ChainRegistry};

    pub use feedscope_rpc::{ClientConfig, HttpConnector, OracleClient, OracleRpc};

    pub use feedscope_engine::{EngineConfig, QueryEngine, QueryReport, QuerySession};

    #[cfg(feature = "format")]
    pub use feedscope_format::{Formatter, OutputFormat};
}
