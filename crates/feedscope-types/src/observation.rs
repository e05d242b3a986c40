//! Sampled oracle observations.

use alloy_primitives::I256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FEED_DECIMALS, RpcError, format_fixed};

/// A raw value/timestamp pair as stored by the oracle contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedReading {
    /// Fixed-point numerator with [`FEED_DECIMALS`] fractional digits.
    pub value: I256,
    /// Unix timestamp (seconds) of the last update.
    pub timestamp: u32,
}

impl FeedReading {
    /// Creates a new reading.
    #[must_use]
    pub const fn new(value: I256, timestamp: u32) -> Self {
        Self { value, timestamp }
    }

    /// Returns true if the feed had never been updated at the read block.
    #[must_use]
    pub const fn is_uninitialized(&self) -> bool {
        self.timestamp == 0
    }
}

/// A single successfully sampled data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Block the value was read at.
    pub block_number: u64,
    /// Decimal rendering of the fixed-point value.
    pub value: String,
    /// Raw signed numerator as a decimal integer string.
    pub raw_value: String,
    /// Time the oracle value was last updated.
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    /// Decodes a raw reading taken at `block_number`.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed was uninitialized at that block or the
    /// timestamp is out of range.
    pub fn from_reading(block_number: u64, reading: FeedReading) -> Result<Self, RpcError> {
        if reading.is_uninitialized() {
            return Err(RpcError::Decode(format!(
                "feed not initialized at block {block_number}"
            )));
        }
        let timestamp = DateTime::from_timestamp(i64::from(reading.timestamp), 0).ok_or_else(
            || RpcError::Decode(format!("timestamp {} out of range", reading.timestamp)),
        )?;

        Ok(Self {
            block_number,
            value: format_fixed(reading.value, FEED_DECIMALS),
            raw_value: reading.value.to_string(),
            timestamp,
        })
    }
}

/// The outcome of reading one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOutcome {
    /// The block produced an observation.
    Observed(Observation),
    /// The read failed and the block contributes nothing.
    Skipped {
        /// Block that failed.
        block_number: u64,
        /// Why it failed.
        reason: String,
    },
}

impl SampleOutcome {
    /// Returns the block this outcome belongs to.
    #[must_use]
    pub const fn block_number(&self) -> u64 {
        match self {
            Self::Observed(obs) => obs.block_number,
            Self::Skipped { block_number, .. } => *block_number,
        }
    }

    /// Returns true if the sample was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Observations of a single query, ascending by block number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSeries {
    observations: Vec<Observation>,
    skipped: usize,
}

impl ResultSeries {
    /// Builds a series from sample outcomes in iteration order.
    ///
    /// Skipped samples are counted and dropped.
    #[must_use]
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = SampleOutcome>) -> Self {
        let mut series = Self::default();
        for outcome in outcomes {
            match outcome {
                SampleOutcome::Observed(obs) => series.observations.push(obs),
                SampleOutcome::Skipped { .. } => series.skipped += 1,
            }
        }
        series
    }

    /// Returns the observations.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Consumes the series, returning the observations.
    #[must_use]
    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the number of samples that were skipped.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}
