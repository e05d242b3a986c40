//! JSON-RPC client for reading `Api3ServerV1` oracle contracts.
//!
//! This crate provides the chain access used by the query engine:
//!
//! - [`OracleRpc`] - The reads the engine performs, as a trait
//! - [`Connector`] - Builds an [`OracleRpc`] for an [`Endpoint`](feedscope_types::Endpoint)
//! - [`OracleClient`] - alloy-backed implementation over HTTP
//! - [`ClientConfig`] - Timeouts and HTTP client settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/feedscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
#[allow(missing_docs, unreachable_pub)]
mod contract;
mod oracle;

pub use client::{ClientConfig, HttpConnector, OracleClient};
pub use oracle::{Connector, OracleRpc};
