//! Chain directory entries.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A chain known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// EIP-155 chain identifier.
    id: u64,
    /// Human-readable name (e.g., "BNB Smart Chain").
    name: String,
    /// Public JSON-RPC endpoint, if one is known.
    #[serde(default)]
    rpc_url: Option<String>,
    /// Deployed `Api3ServerV1` address, if the oracle is deployed.
    #[serde(default)]
    contract_address: Option<Address>,
    /// Whether this is a test network.
    #[serde(default)]
    testnet: bool,
}

impl Chain {
    /// Creates a new chain entry.
    #[must_use]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        rpc_url: Option<String>,
        contract_address: Option<Address>,
        testnet: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            rpc_url,
            contract_address,
            testnet,
        }
    }

    /// Returns the chain identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the public RPC endpoint.
    #[must_use]
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    /// Returns the oracle contract address.
    #[must_use]
    pub const fn contract_address(&self) -> Option<Address> {
        self.contract_address
    }

    /// Returns true for test networks.
    #[must_use]
    pub const fn is_testnet(&self) -> bool {
        self.testnet
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A connectable oracle endpoint: an RPC URL and the contract behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// JSON-RPC URL.
    pub rpc_url: String,
    /// Oracle contract address.
    pub contract_address: Address,
}

impl Endpoint {
    /// Creates a new endpoint.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>, contract_address: Address) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            contract_address,
        }
    }
}
