//! Query-resolution engine for historical oracle reads.
//!
//! This crate turns a [`QueryRequest`](feedscope_types::QueryRequest) into an
//! ordered series of observations:
//!
//! - [`check_input`] / [`resolve_range`] - Range normalization
//! - [`block_at_timestamp`] - Date-to-block binary search
//! - [`resolve_feed_identifier`] - Feed name to identifier lookup
//! - [`sample_range`] - Fixed-stride sampling with per-block skips
//! - [`QueryEngine`] / [`QuerySession`] - The full pipeline, with
//!   latest-wins publication of results
//!
//! # Example
//!
//! ```ignore
//! use feedscope_chains::ChainRegistry;
//! use feedscope_engine::{EngineConfig, QueryEngine};
//! use feedscope_rpc::HttpConnector;
//! use feedscope_types::QueryRequest;
//!
//! let engine = QueryEngine::new(
//!     ChainRegistry::global(),
//!     HttpConnector::default(),
//!     EngineConfig::default(),
//! );
//! let report = engine
//!     .run(&QueryRequest::blocks("56", "ETH/USD", 30_000_000, 30_010_000, 1000))
//!     .await?;
//! for observation in report.series.observations() {
//!     println!("{} {}", observation.block_number, observation.value);
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/feedscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod date_to_block;
mod feed_id;
mod normalize;
mod query;
mod sampler;
mod slot;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{EngineConfig, ResolverConfig, SamplerConfig};
pub use date_to_block::{block_at_timestamp, blocks_for_dates};
pub use feed_id::resolve_feed_identifier;
pub use normalize::{CheckedBounds, CheckedInput, check_input, lookup_endpoint, resolve_range};
pub use query::{PreparedQuery, QueryEngine, QueryReport, prepare_query, run_query};
pub use sampler::{sample_range, sample_range_with_progress};
pub use slot::{QuerySession, QuerySlot, QueryTicket, SlotResult};
