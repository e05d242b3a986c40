//! Resolved block ranges and stride iteration.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// A validated, inclusive block range with a sampling stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeFields")]
pub struct ResolvedRange {
    start_block: u64,
    end_block: u64,
    step: NonZeroU64,
}

#[derive(Deserialize)]
struct RangeFields {
    start_block: u64,
    end_block: u64,
    step: NonZeroU64,
}

impl TryFrom<RangeFields> for ResolvedRange {
    type Error = QueryError;

    fn try_from(fields: RangeFields) -> Result<Self, Self::Error> {
        Self::new(fields.start_block, fields.end_block, fields.step)
    }
}

impl ResolvedRange {
    /// Creates a new range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start_block: u64, end_block: u64, step: NonZeroU64) -> Result<Self, QueryError> {
        if start_block > end_block {
            return Err(QueryError::InvalidBlockRange {
                start: start_block,
                end: end_block,
            });
        }
        Ok(Self {
            start_block,
            end_block,
            step,
        })
    }

    /// Returns the first block (inclusive).
    #[must_use]
    pub const fn start_block(&self) -> u64 {
        self.start_block
    }

    /// Returns the last block (inclusive).
    #[must_use]
    pub const fn end_block(&self) -> u64 {
        self.end_block
    }

    /// Returns the stride between samples.
    #[must_use]
    pub const fn step(&self) -> NonZeroU64 {
        self.step
    }

    /// Returns the number of blocks that will be sampled.
    #[must_use]
    pub const fn sample_count(&self) -> u64 {
        (self.end_block - self.start_block) / self.step.get() + 1
    }

    /// Returns true if the range contains the given block.
    #[must_use]
    pub const fn contains(&self, block: u64) -> bool {
        block >= self.start_block && block <= self.end_block
    }

    /// Returns an iterator over the sampled blocks in ascending order.
    #[must_use]
    pub const fn blocks(&self) -> BlockIter {
        BlockIter {
            next: Some(self.start_block),
            end: self.end_block,
            step: self.step.get(),
        }
    }
}

impl std::fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "blocks {}..={} every {}",
            self.start_block, self.end_block, self.step
        )
    }
}

/// Iterator over the sampled blocks of a [`ResolvedRange`].
#[derive(Debug, Clone)]
pub struct BlockIter {
    next: Option<u64>,
    end: u64,
    step: u64,
}

impl Iterator for BlockIter {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        if current > self.end {
            self.next = None;
            return None;
        }
        // checked_add keeps ranges ending near u64::MAX finite
        self.next = current.checked_add(self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(current) if current <= self.end => (self.end - current) / self.step + 1,
            _ => 0,
        };
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BlockIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn test_range_invalid() {
        assert!(ResolvedRange::new(10, 9, step(1)).is_err());
    }

    #[test]
    fn test_deserialize_validates_order() {
        let inverted = serde_json::from_str::<ResolvedRange>(
            r#"{"start_block":10,"end_block":5,"step":1}"#,
        );
        assert!(inverted.is_err());

        let range: ResolvedRange =
            serde_json::from_str(r#"{"start_block":5,"end_block":10,"step":5}"#).unwrap();
        assert_eq!(range.sample_count(), 2);
    }

    #[test]
    fn test_single_block() {
        let range = ResolvedRange::new(7, 7, step(1000)).unwrap();
        assert_eq!(range.blocks().collect::<Vec<_>>(), vec![7]);
        assert_eq!(range.sample_count(), 1);
    }

    #[test]
    fn test_sample_count_matches_iteration() {
        for (start, end, s) in [(0, 0, 1), (1000, 1002, 1), (0, 10, 3), (5, 100, 7), (0, 99, 100)] {
            let range = ResolvedRange::new(start, end, step(s)).unwrap();
            let blocks: Vec<_> = range.blocks().collect();
            assert_eq!(blocks.len() as u64, (end - start) / s + 1);
            assert_eq!(blocks.len() as u64, range.sample_count());
            assert_eq!(range.blocks().len(), blocks.len());
            assert!(blocks.iter().all(|b| range.contains(*b)));
            assert!(blocks.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_iteration_near_u64_max() {
        let range = ResolvedRange::new(u64::MAX - 2, u64::MAX, step(2)).unwrap();
        assert_eq!(
            range.blocks().collect::<Vec<_>>(),
            vec![u64::MAX - 2, u64::MAX]
        );
    }
}
