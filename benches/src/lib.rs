//! Benchmark fixtures for feedscope.
//!
//! All benchmarks run against the in-memory [`MockChain`], so they measure
//! engine overhead rather than node latency.

use chrono::{DateTime, Utc};
use feedscope_lib::testing::MockChain;
use feedscope_lib::{Address, Chain, ChainRegistry, EngineConfig, QueryEngine, SamplerConfig};

/// Chain id used by every fixture.
pub const BENCH_CHAIN_ID: u64 = 56;

/// Feed registered on every fixture chain.
pub const BENCH_FEED: &str = "ETH/USD";

/// A directory holding the single benchmark chain.
pub fn bench_directory() -> ChainRegistry {
    ChainRegistry::from_chains([Chain::new(
        BENCH_CHAIN_ID,
        "Bench Chain",
        Some("http://bench.invalid".to_string()),
        Some(Address::repeat_byte(0x70)),
        false,
    )])
}

/// A mock chain at `height` with the benchmark feed registered.
pub fn bench_chain(height: u64) -> MockChain {
    MockChain::new(height).with_feed(BENCH_FEED)
}

/// An engine over `chain` sampling with the given concurrency.
pub fn bench_engine(chain: &MockChain, concurrency: usize) -> QueryEngine<ChainRegistry, MockChain> {
    let config = EngineConfig {
        sampler: SamplerConfig { concurrency },
        ..Default::default()
    };
    QueryEngine::new(bench_directory(), chain.clone(), config)
}

/// The wall-clock time of `block` on `chain`.
pub fn instant_of(chain: &MockChain, block: u64) -> DateTime<Utc> {
    let secs = i64::try_from(chain.timestamp_of(block)).unwrap_or(i64::MAX);
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
