//! Calendar instant to block number resolution.

use chrono::{DateTime, Utc};
use feedscope_rpc::OracleRpc;
use feedscope_types::RpcError;
use tracing::{debug, trace};

use crate::ResolverConfig;

/// Returns the block whose timestamp is nearest to `target`.
///
/// Binary search over `[genesis_block, head]`, relying on block timestamps
/// being non-decreasing. Ties between two neighbouring blocks go to the lower
/// one. Targets before genesis resolve to genesis and targets after the head
/// resolve to the head. If `max_iterations` is hit before the interval
/// collapses, the nearer end of the remaining interval is returned.
///
/// # Errors
///
/// Returns an error if any block timestamp fetch fails.
pub async fn block_at_timestamp<R: OracleRpc + ?Sized>(
    rpc: &R,
    target: DateTime<Utc>,
    head: u64,
    config: &ResolverConfig,
) -> Result<u64, RpcError> {
    let target = u64::try_from(target.timestamp()).unwrap_or(0);
    let mut low = config.genesis_block.min(head);
    let mut high = head;

    let mut low_ts = rpc.block_timestamp(low).await?;
    if target <= low_ts || low == high {
        return Ok(low);
    }
    let mut high_ts = rpc.block_timestamp(high).await?;
    if target > high_ts {
        return Ok(high);
    }

    // ts(low) < target <= ts(high)
    let mut iterations = 0;
    while high - low > 1 && iterations < config.max_iterations {
        let mid = low + (high - low) / 2;
        let mid_ts = rpc.block_timestamp(mid).await?;
        trace!(low, mid, high, mid_ts, target, "bisect");
        if mid_ts < target {
            low = mid;
            low_ts = mid_ts;
        } else {
            high = mid;
            high_ts = mid_ts;
        }
        iterations += 1;
    }

    let block = if target - low_ts <= high_ts - target {
        low
    } else {
        high
    };
    debug!(target, block, iterations, "resolved timestamp to block");
    Ok(block)
}

/// Resolves both ends of a date range, issuing the two searches concurrently.
///
/// # Errors
///
/// Returns the first error from either search.
pub async fn blocks_for_dates<R: OracleRpc + ?Sized>(
    rpc: &R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    head: u64,
    config: &ResolverConfig,
) -> Result<(u64, u64), RpcError> {
    tokio::try_join!(
        block_at_timestamp(rpc, start, head, config),
        block_at_timestamp(rpc, end, head, config),
    )
}
