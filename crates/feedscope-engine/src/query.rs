//! End-to-end query pipeline.

use feedscope_chains::ChainDirectory;
use feedscope_rpc::{Connector, OracleRpc};
use feedscope_types::{
    Endpoint, FeedIdentifier, FeedName, QueryError, QueryRequest, ResolvedRange, ResultSeries,
    SampleOutcome,
};
use tracing::{debug, info};

use crate::normalize::{check_input, lookup_endpoint, resolve_range};
use crate::{EngineConfig, SamplerConfig, resolve_feed_identifier, sample_range_with_progress};

/// Runs a query to completion.
///
/// Input errors are reported before any connection is made, in this
/// order: missing or malformed fields, chain lookup, then bound order. Range
/// normalization and feed identifier resolution then run concurrently, and
/// sampling starts only once both succeed.
///
/// # Errors
///
/// Returns the first [`QueryError`] met. A failed query never yields a
/// partial series.
pub async fn run_query<D, C>(
    request: &QueryRequest,
    connector: &C,
    directory: &D,
    config: &EngineConfig,
) -> Result<ResultSeries, QueryError>
where
    D: ChainDirectory + ?Sized,
    C: Connector + ?Sized,
{
    let prepared = prepare_query(request, connector, directory, config).await?;
    Ok(prepared.sample().await?.series)
}

/// Resolves everything a query needs before sampling.
///
/// # Errors
///
/// Returns input, lookup and range errors; see [`run_query`].
pub async fn prepare_query<D, C>(
    request: &QueryRequest,
    connector: &C,
    directory: &D,
    config: &EngineConfig,
) -> Result<PreparedQuery<C::Rpc>, QueryError>
where
    D: ChainDirectory + ?Sized,
    C: Connector + ?Sized,
{
    let input = check_input(request)?;
    let endpoint = lookup_endpoint(directory, input.chain_id, request.rpc_url.as_deref())?;
    input.bounds.ensure_ordered()?;
    debug!(chain = input.chain_id, rpc = %endpoint.rpc_url, "connecting");
    let rpc = connector.connect(&endpoint)?;

    let (range, feed_id) = tokio::try_join!(
        resolve_range(&rpc, input.bounds, input.step, &config.resolver),
        resolve_feed_identifier(&rpc, &input.feed),
    )?;

    Ok(PreparedQuery {
        rpc,
        endpoint,
        chain_id: input.chain_id,
        feed: input.feed,
        feed_id,
        range,
        sampler: config.sampler,
    })
}

/// A query whose range and feed are resolved, ready to sample.
#[derive(Debug)]
pub struct PreparedQuery<R> {
    rpc: R,
    endpoint: Endpoint,
    chain_id: u64,
    feed: FeedName,
    feed_id: FeedIdentifier,
    range: ResolvedRange,
    sampler: SamplerConfig,
}

impl<R: OracleRpc> PreparedQuery<R> {
    /// Returns the resolved block range.
    #[must_use]
    pub const fn range(&self) -> ResolvedRange {
        self.range
    }

    /// Returns the resolved feed identifier.
    #[must_use]
    pub const fn feed_id(&self) -> FeedIdentifier {
        self.feed_id
    }

    /// Returns the endpoint in use.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Samples the range.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoDataInRange`] if every sample was skipped.
    pub async fn sample(self) -> Result<QueryReport, QueryError> {
        self.sample_with_progress(|_| {}).await
    }

    /// Samples the range, reporting each outcome as it is produced.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoDataInRange`] if every sample was skipped.
    pub async fn sample_with_progress<F>(self, on_sample: F) -> Result<QueryReport, QueryError>
    where
        F: FnMut(&SampleOutcome),
    {
        let series =
            sample_range_with_progress(&self.rpc, self.feed_id, self.range, &self.sampler, on_sample)
                .await?;
        info!(
            chain = self.chain_id,
            feed = %self.feed,
            observations = series.len(),
            "query complete"
        );
        Ok(QueryReport {
            chain_id: self.chain_id,
            feed: self.feed,
            feed_id: self.feed_id,
            range: self.range,
            series,
        })
    }
}

/// A completed query.
#[derive(Debug, Clone)]
pub struct QueryReport {
    /// Chain the query ran against.
    pub chain_id: u64,
    /// Feed name as encoded for the contract.
    pub feed: FeedName,
    /// Resolved feed identifier.
    pub feed_id: FeedIdentifier,
    /// Sampled block range.
    pub range: ResolvedRange,
    /// Observations in ascending block order.
    pub series: ResultSeries,
}

/// Query runner bound to a chain directory and connector.
#[derive(Debug, Clone)]
pub struct QueryEngine<D, C> {
    directory: D,
    connector: C,
    config: EngineConfig,
}

impl<D: ChainDirectory, C: Connector> QueryEngine<D, C> {
    /// Creates an engine.
    pub const fn new(directory: D, connector: C, config: EngineConfig) -> Self {
        Self {
            directory,
            connector,
            config,
        }
    }

    /// Returns the engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the chain directory.
    pub const fn directory(&self) -> &D {
        &self.directory
    }

    /// Resolves a request up to the point of sampling.
    ///
    /// # Errors
    ///
    /// See [`prepare_query`].
    pub async fn prepare(&self, request: &QueryRequest) -> Result<PreparedQuery<C::Rpc>, QueryError> {
        prepare_query(request, &self.connector, &self.directory, &self.config).await
    }

    /// Runs a request to completion.
    ///
    /// # Errors
    ///
    /// See [`run_query`].
    pub async fn run(&self, request: &QueryRequest) -> Result<QueryReport, QueryError> {
        self.prepare(request).await?.sample().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;
    use feedscope_chains::ChainRegistry;
    use feedscope_types::{Address, Chain, ErrorKind};

    fn directory() -> ChainRegistry {
        ChainRegistry::from_chains([Chain::new(
            56,
            "BNB Smart Chain",
            Some("https://bsc.example".into()),
            Some(Address::repeat_byte(0x70)),
            false,
        )])
    }

    fn engine(chain: &MockChain) -> QueryEngine<ChainRegistry, MockChain> {
        QueryEngine::new(directory(), chain.clone(), EngineConfig::default())
    }

    #[tokio::test]
    async fn test_three_block_query() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let report = engine(&chain)
            .run(&QueryRequest::blocks("56", "ETH/USD", 1000, 1002, 1))
            .await
            .unwrap();

        assert_eq!(chain.value_reads(), vec![1000, 1001, 1002]);
        assert_eq!(report.series.len(), 3);
        assert_eq!(report.chain_id, 56);
        assert_eq!(report.feed.as_str(), "ETH/USD");
        assert_eq!(chain.connected()[0].rpc_url, "https://bsc.example");
        assert_eq!(chain.connected()[0].contract_address, Address::repeat_byte(0x70));
    }

    #[tokio::test]
    async fn test_end_one_past_height() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let err = engine(&chain)
            .run(&QueryRequest::blocks("56", "ETH/USD", 4000, 5001, 1))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("End block too high. Latest block is 5000"));
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(chain.value_reads().is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_feed_reads_nothing() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let err = engine(&chain)
            .run(&QueryRequest::blocks("56", "BTC/USD", 1, 10, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::FeedNotFound(_)));
        assert!(chain.value_reads().is_empty());
    }

    #[tokio::test]
    async fn test_input_errors_make_no_calls() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let engine = engine(&chain);

        for request in [
            QueryRequest::blocks("56", "ETH/USD", 10, 5, 1),
            QueryRequest::blocks("56", "ETH/USD", 1, 5, 0),
            QueryRequest::blocks("", "ETH/USD", 1, 5, 1),
        ] {
            let err = engine.run(&request).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Input, "{err}");
        }

        assert!(chain.connected().is_empty());
        assert_eq!(chain.height_calls(), 0);
        assert_eq!(chain.resolve_calls(), 0);
    }

    #[tokio::test]
    async fn test_chain_checked_before_bound_order() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let err = run_query(
            &QueryRequest::blocks("999", "ETH/USD", 10, 5, 1),
            &chain,
            &ChainRegistry::from_chains([]),
            &EngineConfig::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, QueryError::ContractNotDeployed(999)));
        assert!(chain.connected().is_empty());
    }

    #[tokio::test]
    async fn test_reversed_bounds_make_no_calls() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let err = engine(&chain)
            .run(&QueryRequest::blocks("56", "ETH/USD", 10, 5, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, QueryError::InvalidBlockRange { start: 10, end: 5 }));
        assert!(chain.connected().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_chain() {
        let chain = MockChain::new(5000);
        let err = engine(&chain)
            .run(&QueryRequest::blocks("1", "ETH/USD", 1, 5, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::ContractNotDeployed(1)));
        assert!(chain.connected().is_empty());
    }

    #[tokio::test]
    async fn test_rpc_override() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let request = QueryRequest::blocks("56", "ETH/USD", 1, 1, 1).with_rpc_url("http://node:8545");
        engine(&chain).run(&request).await.unwrap();
        assert_eq!(chain.connected()[0].rpc_url, "http://node:8545");
    }

    #[tokio::test]
    async fn test_date_query() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let start = chrono::DateTime::from_timestamp(chain.timestamp_of(2000) as i64, 0).unwrap();
        let end = chrono::DateTime::from_timestamp(chain.timestamp_of(2300) as i64, 0).unwrap();

        let report = engine(&chain)
            .run(&QueryRequest::dates("56", "ETH/USD", start, end, 100))
            .await
            .unwrap();

        assert_eq!(chain.value_reads(), vec![2000, 2100, 2200, 2300]);
        assert_eq!((report.range.start_block(), report.range.end_block()), (2000, 2300));
    }

    #[tokio::test]
    async fn test_prepare_exposes_range() {
        let chain = MockChain::new(5000).with_feed("ETH/USD");
        let prepared = engine(&chain)
            .prepare(&QueryRequest::blocks("56", "ETH/USD", 0, 999, 100))
            .await
            .unwrap();

        assert_eq!(prepared.range().sample_count(), 10);
        assert!(chain.value_reads().is_empty());

        let mut seen = 0;
        let report = prepared.sample_with_progress(|_| seen += 1).await.unwrap();
        assert_eq!(seen, 10);
        assert_eq!(report.series.len(), 10);
    }

    #[tokio::test]
    async fn test_run_query_returns_series() {
        let chain = MockChain::new(5000).with_feed("ETH/USD").failing_at(1001);
        let series = run_query(
            &QueryRequest::blocks("56", "ETH/USD", 1000, 1002, 1),
            &chain,
            &directory(),
            &EngineConfig::default(),
        )
        .await
        .unwrap();

        let blocks: Vec<_> = series.observations().iter().map(|o| o.block_number).collect();
        assert_eq!(blocks, vec![1000, 1002]);
    }
}
