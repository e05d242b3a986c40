//! In-memory chain for exercising the engine without a node.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use feedscope_rpc::{Connector, OracleRpc};
use feedscope_types::{B256, Endpoint, FeedName, FeedReading, I256, RpcError};
use parking_lot::Mutex;

/// Fractional digits of one whole 18-decimal unit.
const UNIT_ZEROS: &str = "000000000000000000";

/// Deterministic mock of a chain and its oracle contract.
///
/// Block `n` has timestamp `genesis_timestamp + n * block_time` unless
/// explicit timestamps are set. A registered feed reads `n` whole units at
/// block `n` once it is live. Clones share state, so a test can keep a
/// handle and inspect the calls made through another.
#[derive(Debug, Clone)]
pub struct MockChain {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug)]
struct MockState {
    height: u64,
    genesis_timestamp: u64,
    block_time: u64,
    timestamps: Option<Vec<u64>>,
    feeds: HashMap<B256, B256>,
    live_from: u64,
    failing_blocks: HashSet<u64>,
    fail_height: bool,
    fail_timestamps: bool,
    height_calls: usize,
    timestamp_calls: usize,
    resolve_calls: usize,
    value_reads: Vec<u64>,
    connected: Vec<Endpoint>,
}

impl MockChain {
    /// Creates a chain at `height` with 3-second blocks starting at unix time 1.6e9.
    #[must_use]
    pub fn new(height: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                height,
                genesis_timestamp: 1_600_000_000,
                block_time: 3,
                timestamps: None,
                feeds: HashMap::new(),
                live_from: 0,
                failing_blocks: HashSet::new(),
                fail_height: false,
                fail_timestamps: false,
                height_calls: 0,
                timestamp_calls: 0,
                resolve_calls: 0,
                value_reads: Vec::new(),
                connected: Vec::new(),
            })),
        }
    }

    /// Registers a feed name under a derived non-zero identifier.
    #[must_use]
    pub fn with_feed(self, name: &str) -> Self {
        let encoded = FeedName::encode(name).expect("encodable feed name").encoded();
        let id = B256::left_padding_from(&[0xfe, encoded[0], encoded[1]]);
        self.inner.lock().feeds.insert(encoded, id);
        self
    }

    /// Sets the block time in seconds.
    #[must_use]
    pub fn with_block_time(self, seconds: u64) -> Self {
        self.inner.lock().block_time = seconds;
        self
    }

    /// Uses explicit per-block timestamps; the chain height becomes `len - 1`.
    #[must_use]
    pub fn with_timestamps(self, timestamps: Vec<u64>) -> Self {
        {
            let mut state = self.inner.lock();
            state.height = timestamps.len().saturating_sub(1) as u64;
            state.timestamps = Some(timestamps);
        }
        self
    }

    /// Makes feed reads before `block` report an uninitialized feed.
    #[must_use]
    pub fn live_from(self, block: u64) -> Self {
        self.inner.lock().live_from = block;
        self
    }

    /// Makes reads at `block` fail with a transport error.
    #[must_use]
    pub fn failing_at(self, block: u64) -> Self {
        self.inner.lock().failing_blocks.insert(block);
        self
    }

    /// Makes height queries fail.
    #[must_use]
    pub fn failing_height(self) -> Self {
        self.inner.lock().fail_height = true;
        self
    }

    /// Makes block timestamp queries fail.
    #[must_use]
    pub fn failing_timestamps(self) -> Self {
        self.inner.lock().fail_timestamps = true;
        self
    }

    /// Returns the timestamp of `block` without recording a call.
    #[must_use]
    pub fn timestamp_of(&self, block: u64) -> u64 {
        self.inner.lock().timestamp_of(block)
    }

    /// Returns the blocks passed to `read_feed_value`, in call order.
    #[must_use]
    pub fn value_reads(&self) -> Vec<u64> {
        self.inner.lock().value_reads.clone()
    }

    /// Returns the number of `current_height` calls.
    #[must_use]
    pub fn height_calls(&self) -> usize {
        self.inner.lock().height_calls
    }

    /// Returns the number of `block_timestamp` calls.
    #[must_use]
    pub fn timestamp_calls(&self) -> usize {
        self.inner.lock().timestamp_calls
    }

    /// Returns the number of `resolve_feed_id` calls.
    #[must_use]
    pub fn resolve_calls(&self) -> usize {
        self.inner.lock().resolve_calls
    }

    /// Returns the endpoints this chain was connected through.
    #[must_use]
    pub fn connected(&self) -> Vec<Endpoint> {
        self.inner.lock().connected.clone()
    }

    /// Returns the value a live feed reads at `block`.
    #[must_use]
    pub fn value_at(block: u64) -> I256 {
        I256::from_dec_str(&format!("{block}{UNIT_ZEROS}")).unwrap_or(I256::ZERO)
    }
}

impl MockState {
    fn timestamp_of(&self, block: u64) -> u64 {
        match &self.timestamps {
            Some(ts) => ts[usize::try_from(block).unwrap_or(usize::MAX).min(ts.len() - 1)],
            None => self.genesis_timestamp + block * self.block_time,
        }
    }
}

#[async_trait]
impl OracleRpc for MockChain {
    async fn current_height(&self) -> Result<u64, RpcError> {
        let mut state = self.inner.lock();
        state.height_calls += 1;
        if state.fail_height {
            return Err(RpcError::Transport("mock height failure".into()));
        }
        Ok(state.height)
    }

    async fn block_timestamp(&self, block: u64) -> Result<u64, RpcError> {
        let mut state = self.inner.lock();
        state.timestamp_calls += 1;
        if state.fail_timestamps {
            return Err(RpcError::Transport("mock timestamp failure".into()));
        }
        if block > state.height {
            return Err(RpcError::BlockNotFound(block));
        }
        Ok(state.timestamp_of(block))
    }

    async fn resolve_feed_id(&self, encoded_name: B256) -> Result<B256, RpcError> {
        let mut state = self.inner.lock();
        state.resolve_calls += 1;
        Ok(state.feeds.get(&encoded_name).copied().unwrap_or(B256::ZERO))
    }

    async fn read_feed_value(&self, feed_id: B256, block: u64) -> Result<FeedReading, RpcError> {
        let mut state = self.inner.lock();
        state.value_reads.push(block);
        if state.failing_blocks.contains(&block) {
            return Err(RpcError::Transport(format!("mock read failure at {block}")));
        }
        if block > state.height {
            return Err(RpcError::BlockNotFound(block));
        }
        if !state.feeds.values().any(|id| *id == feed_id) || block < state.live_from {
            return Ok(FeedReading::new(I256::ZERO, 0));
        }
        let timestamp = u32::try_from(state.timestamp_of(block))
            .map_err(|e| RpcError::Decode(e.to_string()))?;
        Ok(FeedReading::new(Self::value_at(block), timestamp))
    }
}

impl Connector for MockChain {
    type Rpc = Self;

    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Rpc, RpcError> {
        self.inner.lock().connected.push(endpoint.clone());
        Ok(self.clone())
    }
}
