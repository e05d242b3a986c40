//! alloy-backed oracle client over HTTP JSON-RPC.

use std::time::Duration;

use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::http::Http,
};
use async_trait::async_trait;
use feedscope_types::{B256, Endpoint, FeedReading, I256, RpcError};
use reqwest::{Client, Url};
use tracing::debug;

use crate::contract::IApi3ServerV1;
use crate::{Connector, OracleRpc};

/// Configuration for the RPC client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from request timeout).
    pub connect_timeout: Duration,
    /// Idle connections kept per host.
    pub max_idle_connections: usize,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_idle_connections: 10,
            user_agent: format!("feedscope/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Oracle client bound to one RPC endpoint and one `Api3ServerV1` contract.
#[derive(Clone)]
pub struct OracleClient {
    provider: DynProvider<Ethereum>,
    contract: IApi3ServerV1::IApi3ServerV1Instance<DynProvider<Ethereum>>,
}

impl std::fmt::Debug for OracleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleClient")
            .field("contract", self.contract.address())
            .finish_non_exhaustive()
    }
}

impl OracleClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the HTTP client cannot be created.
    pub fn new(endpoint: &Endpoint, config: &ClientConfig) -> Result<Self, RpcError> {
        let url = endpoint
            .rpc_url
            .parse::<Url>()
            .map_err(|e| RpcError::InvalidEndpoint {
                url: endpoint.rpc_url.clone(),
                reason: e.to_string(),
            })?;

        let http = Client::builder()
            .pool_max_idle_per_host(config.max_idle_connections)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| RpcError::InvalidEndpoint {
                url: endpoint.rpc_url.clone(),
                reason: e.to_string(),
            })?;

        let rpc_client = RpcClient::new(Http::with_client(http, url), false);
        let provider = ProviderBuilder::new().connect_client(rpc_client).erased();
        let contract = IApi3ServerV1::new(endpoint.contract_address, provider.clone());

        debug!(url = %endpoint.rpc_url, contract = %endpoint.contract_address, "created oracle client");
        Ok(Self { provider, contract })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the HTTP client cannot be created.
    pub fn with_defaults(endpoint: &Endpoint) -> Result<Self, RpcError> {
        Self::new(endpoint, &ClientConfig::default())
    }
}

fn transport_error(e: impl std::fmt::Display) -> RpcError {
    RpcError::Transport(e.to_string())
}

fn contract_error(e: alloy::contract::Error) -> RpcError {
    match e {
        alloy::contract::Error::TransportError(e) => transport_error(e),
        other => RpcError::Contract(other.to_string()),
    }
}

#[async_trait]
impl OracleRpc for OracleClient {
    async fn current_height(&self) -> Result<u64, RpcError> {
        let height = self
            .provider
            .get_block_number()
            .await
            .map_err(transport_error)?;
        debug!(height, "fetched chain height");
        Ok(height)
    }

    async fn block_timestamp(&self, block: u64) -> Result<u64, RpcError> {
        let header = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block))
            .await
            .map_err(transport_error)?
            .ok_or(RpcError::BlockNotFound(block))?
            .header;
        Ok(header.timestamp)
    }

    async fn resolve_feed_id(&self, encoded_name: B256) -> Result<B256, RpcError> {
        let feed_id = self
            .contract
            .dapiNameToDataFeedId(encoded_name)
            .call()
            .await
            .map_err(contract_error)?;
        debug!(%encoded_name, %feed_id, "resolved data feed id");
        Ok(feed_id)
    }

    async fn read_feed_value(&self, feed_id: B256, block: u64) -> Result<FeedReading, RpcError> {
        let stored = self
            .contract
            .readDataFeedWithId(feed_id)
            .block(BlockId::number(block))
            .call()
            .await
            .map_err(contract_error)?;

        // int224 widened through its decimal form
        let value = I256::from_dec_str(&stored.value.to_string())
            .map_err(|e| RpcError::Decode(e.to_string()))?;
        Ok(FeedReading::new(value, stored.timestamp))
    }
}

/// Connector producing [`OracleClient`]s over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    config: ClientConfig,
}

impl HttpConnector {
    /// Creates a connector with the given client configuration.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Connector for HttpConnector {
    type Rpc = OracleClient;

    fn connect(&self, endpoint: &Endpoint) -> Result<Self::Rpc, RpcError> {
        OracleClient::new(endpoint, &self.config)
    }
}
