//! Core types for the feedscope historical oracle reader.
//!
//! This crate provides the data structures shared across feedscope:
//!
//! - [`QueryRequest`] - A fully-formed query (chain, feed, range, stride)
//! - [`QueryForm`] - Raw string input that parses into a [`QueryRequest`]
//! - [`ResolvedRange`] - A validated `(start, end, step)` block range
//! - [`FeedName`] / [`FeedIdentifier`] - Encoded feed names and resolved identifiers
//! - [`Observation`] / [`ResultSeries`] - Sampled oracle values
//! - [`Chain`] - Chain directory entry
//! - [`QueryError`] / [`RpcError`] - Error taxonomy

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/feedscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod chain;
mod error;
mod feed;
mod fixed;
mod observation;
mod range;
mod request;

pub use chain::{Chain, Endpoint};
pub use error::{ErrorKind, FeedNameError, QueryError, Result, RpcError};
pub use feed::{FeedIdentifier, FeedName};
pub use fixed::{FEED_DECIMALS, format_fixed};
pub use observation::{FeedReading, Observation, ResultSeries, SampleOutcome};
pub use range::{BlockIter, ResolvedRange};
pub use request::{DEFAULT_STEP, QueryForm, QueryRequest, RangeBounds, RangeMode, parse_instant};

pub use alloy_primitives::{Address, B256, I256};
