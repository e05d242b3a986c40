//! Error types for feedscope.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for feedscope query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Coarse classification of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad user input, reported before any network call.
    Input,
    /// Unknown chain, missing endpoint, unregistered feed or RPC failure.
    Lookup,
    /// End block beyond the current chain height.
    Range,
    /// The whole range was sampled and nothing came back.
    EmptyResult,
}

/// Errors that end a query.
///
/// A failed query never carries partial results. Failures of individual
/// samples are not represented here; see [`crate::SampleOutcome`].
#[derive(Error, Debug)]
pub enum QueryError {
    /// A required field was left empty.
    #[error("All fields are required (missing: {0})")]
    MissingFields(String),

    /// A numeric field could not be parsed.
    #[error("Invalid {field}: {value:?} is not a valid number")]
    InvalidNumber {
        /// The offending field.
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// A date field could not be parsed.
    #[error("Invalid {field}: {value:?} is not a date (expected YYYY-MM-DD or RFC 3339)")]
    InvalidDate {
        /// The offending field.
        field: &'static str,
        /// The raw input.
        value: String,
    },

    /// Both block and date bounds were supplied.
    #[error("Provide either block bounds or date bounds, not both")]
    MixedRangeModes,

    /// Sample stride is zero or negative.
    #[error("Block step must be a positive integer, got {0}")]
    InvalidStep(i64),

    /// Start block is after end block.
    #[error("Start block must be less than end block ({start} > {end})")]
    InvalidBlockRange {
        /// The start block.
        start: u64,
        /// The end block.
        end: u64,
    },

    /// Start date is after end date.
    #[error("Start date must be before end date ({start} > {end})")]
    InvalidDateRange {
        /// The start instant.
        start: DateTime<Utc>,
        /// The end instant.
        end: DateTime<Utc>,
    },

    /// The feed name cannot be encoded as `bytes32`.
    #[error(transparent)]
    FeedName(#[from] FeedNameError),

    /// No oracle contract is known for the chain.
    #[error("Contract not deployed on chain {0}")]
    ContractNotDeployed(u64),

    /// No RPC endpoint is known for the chain.
    #[error("Unsupported chain ID: {0}")]
    UnsupportedChain(u64),

    /// The feed name maps to the all-zero identifier.
    #[error("Feed not found: {0}")]
    FeedNotFound(String),

    /// End block is above the current chain height.
    #[error("End block too high. Latest block is {latest} (requested {end})")]
    EndBlockTooHigh {
        /// The requested end block.
        end: u64,
        /// The current chain height.
        latest: u64,
    },

    /// Every sample in the range failed.
    #[error("No data found in range {start}..={end}")]
    NoDataInRange {
        /// First block of the range.
        start: u64,
        /// Last block of the range.
        end: u64,
    },

    /// An RPC call outside the sampling loop failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl QueryError {
    /// Returns the taxonomy class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFields(_)
            | Self::InvalidNumber { .. }
            | Self::InvalidDate { .. }
            | Self::MixedRangeModes
            | Self::InvalidStep(_)
            | Self::InvalidBlockRange { .. }
            | Self::InvalidDateRange { .. }
            | Self::FeedName(_) => ErrorKind::Input,
            Self::ContractNotDeployed(_)
            | Self::UnsupportedChain(_)
            | Self::FeedNotFound(_)
            | Self::Rpc(_) => ErrorKind::Lookup,
            Self::EndBlockTooHigh { .. } => ErrorKind::Range,
            Self::NoDataInRange { .. } => ErrorKind::EmptyResult,
        }
    }
}

/// Errors raised by an RPC client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The endpoint URL is malformed.
    #[error("Invalid RPC endpoint {url}: {reason}")]
    InvalidEndpoint {
        /// The endpoint URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Transport-level failure (connection, HTTP, JSON-RPC error).
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The contract call reverted or returned undecodable data.
    #[error("Contract call failed: {0}")]
    Contract(String),

    /// The node does not know the requested block.
    #[error("Block {0} not found")]
    BlockNotFound(u64),

    /// The returned value could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Error for feed names that cannot be encoded as `bytes32`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedNameError {
    /// The name is empty.
    #[error("Feed name is empty")]
    Empty,

    /// The name contains a character outside the encodable set.
    #[error("Feed name contains unencodable character {ch:?} at byte {index}")]
    Unencodable {
        /// The rejected character.
        ch: char,
        /// Byte offset within the name.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_block_message_cites_latest() {
        let err = QueryError::EndBlockTooHigh {
            end: 101,
            latest: 100,
        };
        assert!(err.to_string().contains("Latest block is 100"));
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(QueryError::InvalidStep(0).kind(), ErrorKind::Input);
        assert_eq!(QueryError::FeedNotFound("X".into()).kind(), ErrorKind::Lookup);
        assert_eq!(
            QueryError::Rpc(RpcError::Transport("down".into())).kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            QueryError::NoDataInRange { start: 1, end: 2 }.kind(),
            ErrorKind::EmptyResult
        );
    }
}
