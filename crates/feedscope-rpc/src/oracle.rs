//! The chain reads the query engine depends on.

use std::sync::Arc;

use async_trait::async_trait;
use feedscope_types::{B256, Endpoint, FeedReading, RpcError};

/// Point-in-time reads against a chain and its oracle contract.
#[async_trait]
pub trait OracleRpc: Send + Sync {
    /// Returns the current chain height.
    async fn current_height(&self) -> Result<u64, RpcError>;

    /// Returns the timestamp (unix seconds) of `block`.
    async fn block_timestamp(&self, block: u64) -> Result<u64, RpcError>;

    /// Maps a `bytes32`-encoded feed name to its data feed id.
    ///
    /// Unregistered names map to the all-zero value.
    async fn resolve_feed_id(&self, encoded_name: B256) -> Result<B256, RpcError>;

    /// Reads the stored value and timestamp of a feed as of `block`.
    async fn read_feed_value(&self, feed_id: B256, block: u64) -> Result<FeedReading, RpcError>;
}

#[async_trait]
impl<T: OracleRpc + ?Sized> OracleRpc for Arc<T> {
    async fn current_height(&self) -> Result<u64, RpcError> {
        (**self).current_height().await
    }

    async fn block_timestamp(&self, block: u64) -> Result<u64, RpcError> {
        (**self).block_timestamp(block).await
    }

    async fn resolve_feed_id(&self, encoded_name: B256) -> Result<B256, RpcError> {
        (**self).resolve_feed_id(encoded_name).await
    }

    async fn read_feed_value(&self, feed_id: B256, block: u64) -> Result<FeedReading, RpcError> {
        (**self).read_feed_value(feed_id, block).await
    }
}

/// Creates an [`OracleRpc`] handle for an endpoint.
pub trait Connector: Send + Sync {
    /// The handle type produced.
    type Rpc: OracleRpc + 'static;

    /// Connects to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is malformed or the client cannot be built.
    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Rpc, RpcError>;
}
