//! Fixed-stride sampling of a feed across a block range.

use feedscope_rpc::OracleRpc;
use feedscope_types::{
    FeedIdentifier, Observation, QueryError, ResolvedRange, ResultSeries, SampleOutcome,
};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::SamplerConfig;

/// Samples `feed` at every block of `range`.
///
/// See [`sample_range_with_progress`].
///
/// # Errors
///
/// Returns [`QueryError::NoDataInRange`] if no block produced an observation.
pub async fn sample_range<R: OracleRpc + ?Sized>(
    rpc: &R,
    feed: FeedIdentifier,
    range: ResolvedRange,
    config: &SamplerConfig,
) -> Result<ResultSeries, QueryError> {
    sample_range_with_progress(rpc, feed, range, config, |_| {}).await
}

/// Samples `feed` at every block of `range`, reporting each outcome.
///
/// One read is issued per block, at most `config.concurrency` at a time.
/// Outcomes are produced in ascending block order regardless of
/// concurrency. A failed read is logged and skipped; it never aborts the
/// loop.
///
/// # Errors
///
/// Returns [`QueryError::NoDataInRange`] if no block produced an observation.
pub async fn sample_range_with_progress<R, F>(
    rpc: &R,
    feed: FeedIdentifier,
    range: ResolvedRange,
    config: &SamplerConfig,
    mut on_sample: F,
) -> Result<ResultSeries, QueryError>
where
    R: OracleRpc + ?Sized,
    F: FnMut(&SampleOutcome),
{
    let outcomes: Vec<SampleOutcome> = stream::iter(range.blocks())
        .map(|block| sample_block(rpc, feed, block))
        .buffered(config.concurrency.max(1))
        .inspect(|outcome| on_sample(outcome))
        .collect()
        .await;

    let series = ResultSeries::from_outcomes(outcomes);
    if series.is_empty() {
        return Err(QueryError::NoDataInRange {
            start: range.start_block(),
            end: range.end_block(),
        });
    }

    info!(
        observations = series.len(),
        skipped = series.skipped(),
        %range,
        "sampling complete"
    );
    Ok(series)
}

/// Reads a single block, converting any failure into a skipped outcome.
async fn sample_block<R: OracleRpc + ?Sized>(
    rpc: &R,
    feed: FeedIdentifier,
    block_number: u64,
) -> SampleOutcome {
    let observation = rpc
        .read_feed_value(feed.as_b256(), block_number)
        .await
        .and_then(|reading| Observation::from_reading(block_number, reading));

    match observation {
        Ok(observation) => SampleOutcome::Observed(observation),
        Err(e) => {
            warn!(block = block_number, error = %e, "failed to query block, skipping");
            SampleOutcome::Skipped {
                block_number,
                reason: e.to_string(),
            }
        }
    }
}
