//! Range validation and normalization.
//!
//! Normalization runs in stages so that input errors never cost a network
//! call. [`check_input`] validates the request offline and
//! [`lookup_endpoint`] consults the chain directory. Bound order is checked
//! after the lookup with [`CheckedBounds::ensure_ordered`], and
//! [`resolve_range`] then converts dates and applies the chain height bound.

use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use feedscope_chains::ChainDirectory;
use feedscope_rpc::OracleRpc;
use feedscope_types::{Endpoint, FeedName, QueryError, QueryRequest, RangeBounds, ResolvedRange};
use tracing::debug;

use crate::{ResolverConfig, blocks_for_dates};

/// Range bounds with both ends present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckedBounds {
    /// Block bounds.
    Blocks {
        /// Start block.
        start: u64,
        /// End block.
        end: u64,
    },
    /// Date bounds.
    Dates {
        /// Start instant.
        start: DateTime<Utc>,
        /// End instant.
        end: DateTime<Utc>,
    },
}

impl CheckedBounds {
    /// Checks that the start bound is not after the end bound.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidBlockRange`] or
    /// [`QueryError::InvalidDateRange`] for reversed bounds.
    pub fn ensure_ordered(&self) -> Result<(), QueryError> {
        match *self {
            Self::Blocks { start, end } if start > end => {
                Err(QueryError::InvalidBlockRange { start, end })
            }
            Self::Dates { start, end } if start > end => {
                Err(QueryError::InvalidDateRange { start, end })
            }
            _ => Ok(()),
        }
    }
}

/// A request whose fields are present and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedInput {
    /// Numeric chain id.
    pub chain_id: u64,
    /// Encoded feed name.
    pub feed: FeedName,
    /// Complete range bounds.
    pub bounds: CheckedBounds,
    /// Positive sampling stride.
    pub step: NonZeroU64,
}

/// Validates a request without touching the network.
///
/// # Errors
///
/// Returns an input error for missing fields, a non-numeric chain id, an
/// unencodable feed name or a non-positive step. Bound order is left to
/// [`CheckedBounds::ensure_ordered`].
pub fn check_input(request: &QueryRequest) -> Result<CheckedInput, QueryError> {
    let mut missing = Vec::new();
    if request.chain_id.trim().is_empty() {
        missing.push("chain id");
    }
    if request.feed_name.trim().is_empty() {
        missing.push("feed name");
    }
    match request.bounds {
        RangeBounds::Blocks { start, end } => {
            if start.is_none() {
                missing.push("start block");
            }
            if end.is_none() {
                missing.push("end block");
            }
        }
        RangeBounds::Dates { start, end } => {
            if start.is_none() {
                missing.push("start date");
            }
            if end.is_none() {
                missing.push("end date");
            }
        }
    }
    if !missing.is_empty() {
        return Err(QueryError::MissingFields(missing.join(", ")));
    }

    let chain_id = request
        .chain_id
        .trim()
        .parse::<u64>()
        .map_err(|_| QueryError::InvalidNumber {
            field: "chain id",
            value: request.chain_id.clone(),
        })?;
    let feed = FeedName::encode(&request.feed_name)?;
    let step = u64::try_from(request.step)
        .ok()
        .and_then(NonZeroU64::new)
        .ok_or(QueryError::InvalidStep(request.step))?;

    let bounds = match request.bounds {
        RangeBounds::Blocks {
            start: Some(start),
            end: Some(end),
        } => CheckedBounds::Blocks { start, end },
        RangeBounds::Dates {
            start: Some(start),
            end: Some(end),
        } => CheckedBounds::Dates { start, end },
        // presence checked above
        _ => return Err(QueryError::MissingFields("range bounds".into())),
    };

    Ok(CheckedInput {
        chain_id,
        feed,
        bounds,
        step,
    })
}

/// Finds the oracle endpoint for a chain.
///
/// `rpc_override` replaces the directory's RPC URL but not its contract
/// address.
///
/// # Errors
///
/// Returns [`QueryError::ContractNotDeployed`] if the chain is unknown or has
/// no contract, and [`QueryError::UnsupportedChain`] if no RPC URL is known.
pub fn lookup_endpoint<D: ChainDirectory + ?Sized>(
    directory: &D,
    chain_id: u64,
    rpc_override: Option<&str>,
) -> Result<Endpoint, QueryError> {
    let chain = directory.lookup(chain_id);
    let contract_address = chain
        .and_then(|c| c.contract_address())
        .ok_or(QueryError::ContractNotDeployed(chain_id))?;
    let rpc_url = rpc_override
        .or_else(|| chain.and_then(|c| c.rpc_url()))
        .ok_or(QueryError::UnsupportedChain(chain_id))?;

    Ok(Endpoint::new(rpc_url, contract_address))
}

/// Resolves checked bounds into a block range bounded by the chain height.
///
/// Fetches the current height once. In date mode both dates are converted
/// to blocks before the height check.
///
/// # Errors
///
/// Returns an RPC error if a fetch fails, [`QueryError::InvalidBlockRange`]
/// if the converted start is after the end, and
/// [`QueryError::EndBlockTooHigh`] if the end is beyond the chain height.
pub async fn resolve_range<R: OracleRpc + ?Sized>(
    rpc: &R,
    bounds: CheckedBounds,
    step: NonZeroU64,
    config: &ResolverConfig,
) -> Result<ResolvedRange, QueryError> {
    let head = rpc.current_height().await?;

    let (start, end) = match bounds {
        CheckedBounds::Blocks { start, end } => (start, end),
        CheckedBounds::Dates { start, end } => {
            let blocks = blocks_for_dates(rpc, start, end, head, config).await?;
            debug!(%start, %end, start_block = blocks.0, end_block = blocks.1, "converted dates to blocks");
            blocks
        }
    };

    if start > end {
        return Err(QueryError::InvalidBlockRange { start, end });
    }
    if end > head {
        return Err(QueryError::EndBlockTooHigh { end, latest: head });
    }

    ResolvedRange::new(start, end, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;
    use feedscope_chains::ChainRegistry;
    use feedscope_types::{Address, Chain, ErrorKind};

    fn step(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    fn at(secs: u64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs as i64, 0).unwrap()
    }

    fn directory() -> ChainRegistry {
        ChainRegistry::from_chains([
            Chain::new(
                56,
                "BNB Smart Chain",
                Some("https://bsc.example".into()),
                Some(Address::repeat_byte(0xaa)),
                false,
            ),
            Chain::new(7, "No RPC", None, Some(Address::repeat_byte(0xbb)), false),
            Chain::new(8, "No Contract", Some("https://eight.example".into()), None, false),
        ])
    }

    #[test]
    fn test_check_block_request() {
        let checked = check_input(&QueryRequest::blocks("56", "ETH/USD", 1000, 1002, 1)).unwrap();
        assert_eq!(checked.chain_id, 56);
        assert_eq!(checked.bounds, CheckedBounds::Blocks { start: 1000, end: 1002 });
        assert_eq!(checked.step.get(), 1);
    }

    #[test]
    fn test_check_missing_fields() {
        let request = QueryRequest {
            chain_id: String::new(),
            feed_name: "ETH/USD".into(),
            bounds: RangeBounds::Blocks {
                start: Some(1),
                end: None,
            },
            step: 1,
            rpc_url: None,
        };
        let err = check_input(&request).unwrap_err();
        assert!(matches!(err, QueryError::MissingFields(ref m) if m == "chain id, end block"));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_check_rejects_non_positive_step() {
        for bad in [0, -1, -1000] {
            let err = check_input(&QueryRequest::blocks("56", "ETH/USD", 1, 2, bad)).unwrap_err();
            assert!(matches!(err, QueryError::InvalidStep(s) if s == bad));
        }
    }

    #[test]
    fn test_reversed_blocks_pass_input_check() {
        let checked = check_input(&QueryRequest::blocks("56", "ETH/USD", 10, 9, 1)).unwrap();
        let err = checked.bounds.ensure_ordered().unwrap_err();
        assert!(matches!(err, QueryError::InvalidBlockRange { start: 10, end: 9 }));
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let request = QueryRequest::dates("56", "ETH/USD", at(2000), at(1000), 1);
        let checked = check_input(&request).unwrap();
        assert!(matches!(
            checked.bounds.ensure_ordered(),
            Err(QueryError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_ordered_bounds_accepted() {
        assert!(CheckedBounds::Blocks { start: 7, end: 7 }.ensure_ordered().is_ok());
        assert!(
            CheckedBounds::Dates {
                start: at(1000),
                end: at(2000)
            }
            .ensure_ordered()
            .is_ok()
        );
    }

    #[test]
    fn test_blank_feed_name_is_missing() {
        let err = check_input(&QueryRequest::blocks("56", "   ", 1, 2, 1)).unwrap_err();
        assert!(matches!(err, QueryError::MissingFields(ref m) if m == "feed name"));
    }

    #[test]
    fn test_check_rejects_bad_chain_id() {
        let err = check_input(&QueryRequest::blocks("bsc", "ETH/USD", 1, 2, 1)).unwrap_err();
        assert!(matches!(err, QueryError::InvalidNumber { field: "chain id", .. }));
    }

    #[test]
    fn test_check_rejects_unencodable_feed() {
        let err = check_input(&QueryRequest::blocks("56", "ETH\nUSD", 1, 2, 1)).unwrap_err();
        assert!(matches!(err, QueryError::FeedName(_)));
    }

    #[test]
    fn test_lookup_endpoint() {
        let endpoint = lookup_endpoint(&directory(), 56, None).unwrap();
        assert_eq!(endpoint.rpc_url, "https://bsc.example");
        assert_eq!(endpoint.contract_address, Address::repeat_byte(0xaa));
    }

    #[test]
    fn test_lookup_unknown_chain() {
        assert!(matches!(
            lookup_endpoint(&directory(), 999, None),
            Err(QueryError::ContractNotDeployed(999))
        ));
        assert!(matches!(
            lookup_endpoint(&directory(), 8, None),
            Err(QueryError::ContractNotDeployed(8))
        ));
    }

    #[test]
    fn test_lookup_missing_rpc() {
        assert!(matches!(
            lookup_endpoint(&directory(), 7, None),
            Err(QueryError::UnsupportedChain(7))
        ));
        let endpoint = lookup_endpoint(&directory(), 7, Some("http://localhost:8545")).unwrap();
        assert_eq!(endpoint.rpc_url, "http://localhost:8545");
    }

    #[tokio::test]
    async fn test_resolve_block_range() {
        let chain = MockChain::new(5000);
        let range = resolve_range(
            &chain,
            CheckedBounds::Blocks { start: 1000, end: 5000 },
            step(10),
            &ResolverConfig::default(),
        )
        .await
        .unwrap();
        assert_eq!((range.start_block(), range.end_block()), (1000, 5000));
        assert_eq!(chain.height_calls(), 1);
        assert_eq!(chain.timestamp_calls(), 0);
    }

    #[tokio::test]
    async fn test_end_beyond_height() {
        let chain = MockChain::new(5000);
        let err = resolve_range(
            &chain,
            CheckedBounds::Blocks { start: 1000, end: 5001 },
            step(1),
            &ResolverConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QueryError::EndBlockTooHigh { end: 5001, latest: 5000 }));
        assert!(err.to_string().contains("5000"));
        assert!(chain.value_reads().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_date_range() {
        let chain = MockChain::new(5000);
        let bounds = CheckedBounds::Dates {
            start: at(chain.timestamp_of(1200)),
            end: at(chain.timestamp_of(3400) + 1),
        };
        let range = resolve_range(&chain, bounds, step(100), &ResolverConfig::default())
            .await
            .unwrap();
        assert_eq!((range.start_block(), range.end_block()), (1200, 3400));
        assert_eq!(chain.height_calls(), 1);
    }

    #[tokio::test]
    async fn test_date_conversion_failure() {
        let chain = MockChain::new(5000).failing_timestamps();
        let bounds = CheckedBounds::Dates {
            start: at(1_600_000_000),
            end: at(1_600_001_000),
        };
        let err = resolve_range(&chain, bounds, step(1), &ResolverConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Rpc(_)));
    }

    #[tokio::test]
    async fn test_height_failure() {
        let chain = MockChain::new(5000).failing_height();
        let err = resolve_range(
            &chain,
            CheckedBounds::Blocks { start: 1, end: 2 },
            step(1),
            &ResolverConfig::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
