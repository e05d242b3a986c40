//! Query requests and raw form input.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Default number of blocks between samples.
pub const DEFAULT_STEP: i64 = 1000;

/// How the query window is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeMode {
    /// Explicit block numbers.
    BlockRange,
    /// Calendar instants converted to blocks.
    DateRange,
}

impl std::fmt::Display for RangeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlockRange => f.write_str("block range"),
            Self::DateRange => f.write_str("date range"),
        }
    }
}

/// Range bounds as supplied by the user; either bound may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBounds {
    /// Block bounds (inclusive).
    Blocks {
        /// Start block.
        start: Option<u64>,
        /// End block.
        end: Option<u64>,
    },
    /// Date bounds (inclusive).
    Dates {
        /// Start instant.
        start: Option<DateTime<Utc>>,
        /// End instant.
        end: Option<DateTime<Utc>>,
    },
}

impl RangeBounds {
    /// Returns the range mode these bounds belong to.
    #[must_use]
    pub const fn mode(&self) -> RangeMode {
        match self {
            Self::Blocks { .. } => RangeMode::BlockRange,
            Self::Dates { .. } => RangeMode::DateRange,
        }
    }
}

/// A complete query as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Chain identifier as typed (e.g., `"56"`).
    pub chain_id: String,
    /// Human-readable feed name (e.g., `"ETH/USD"`).
    pub feed_name: String,
    /// Range bounds.
    pub bounds: RangeBounds,
    /// Blocks between samples; must be positive.
    pub step: i64,
    /// RPC endpoint overriding the chain directory's default.
    pub rpc_url: Option<String>,
}

impl QueryRequest {
    /// Creates a block-range request.
    #[must_use]
    pub fn blocks(
        chain_id: impl Into<String>,
        feed_name: impl Into<String>,
        start: u64,
        end: u64,
        step: i64,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            feed_name: feed_name.into(),
            bounds: RangeBounds::Blocks {
                start: Some(start),
                end: Some(end),
            },
            step,
            rpc_url: None,
        }
    }

    /// Creates a date-range request.
    #[must_use]
    pub fn dates(
        chain_id: impl Into<String>,
        feed_name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: i64,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            feed_name: feed_name.into(),
            bounds: RangeBounds::Dates {
                start: Some(start),
                end: Some(end),
            },
            step,
            rpc_url: None,
        }
    }

    /// Overrides the RPC endpoint.
    #[must_use]
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Returns the range mode.
    #[must_use]
    pub const fn mode(&self) -> RangeMode {
        self.bounds.mode()
    }
}

/// Raw, untyped query input: every field is optional free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    /// Chain identifier.
    pub chain_id: Option<String>,
    /// Feed name.
    pub feed_name: Option<String>,
    /// Start block number.
    pub start_block: Option<String>,
    /// End block number.
    pub end_block: Option<String>,
    /// Start date (`YYYY-MM-DD` or RFC 3339).
    pub start_date: Option<String>,
    /// End date (`YYYY-MM-DD` or RFC 3339).
    pub end_date: Option<String>,
    /// Blocks between samples.
    pub step: Option<String>,
    /// RPC endpoint override.
    pub rpc_url: Option<String>,
}

impl QueryForm {
    /// Parses the form into a request.
    ///
    /// Blank fields become missing values; presence is checked later by the
    /// range normalizer. Date fields select [`RangeMode::DateRange`].
    ///
    /// # Errors
    ///
    /// Returns an error if a number or date is malformed, or if block and
    /// date bounds are mixed.
    pub fn parse(&self) -> Result<QueryRequest, QueryError> {
        let has_dates = filled(&self.start_date).is_some() || filled(&self.end_date).is_some();
        let has_blocks = filled(&self.start_block).is_some() || filled(&self.end_block).is_some();
        if has_dates && has_blocks {
            return Err(QueryError::MixedRangeModes);
        }

        let bounds = if has_dates {
            RangeBounds::Dates {
                start: filled(&self.start_date)
                    .map(|s| parse_date_field("start date", s))
                    .transpose()?,
                end: filled(&self.end_date)
                    .map(|s| parse_date_field("end date", s))
                    .transpose()?,
            }
        } else {
            RangeBounds::Blocks {
                start: filled(&self.start_block)
                    .map(|s| parse_number("start block", s))
                    .transpose()?,
                end: filled(&self.end_block)
                    .map(|s| parse_number("end block", s))
                    .transpose()?,
            }
        };

        let step = match filled(&self.step) {
            Some(s) => s.parse::<i64>().map_err(|_| QueryError::InvalidNumber {
                field: "block step",
                value: s.to_string(),
            })?,
            None => DEFAULT_STEP,
        };

        Ok(QueryRequest {
            chain_id: filled(&self.chain_id).unwrap_or_default().to_string(),
            feed_name: filled(&self.feed_name).unwrap_or_default().to_string(),
            bounds,
            step,
            rpc_url: filled(&self.rpc_url).map(str::to_string),
        })
    }
}

/// Parses `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
#[must_use]
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn filled(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(field: &'static str, s: &str) -> Result<u64, QueryError> {
    s.parse().map_err(|_| QueryError::InvalidNumber {
        field,
        value: s.to_string(),
    })
}

fn parse_date_field(field: &'static str, s: &str) -> Result<DateTime<Utc>, QueryError> {
    parse_instant(s).ok_or_else(|| QueryError::InvalidDate {
        field,
        value: s.to_string(),
    })
}
