//! Chain directory for the feedscope historical oracle reader.
//!
//! This crate maps EIP-155 chain identifiers to a public RPC endpoint and
//! the deployed `Api3ServerV1` contract address.
//!
//! # Example
//!
//! ```
//! use feedscope_chains::{ChainDirectory, ChainRegistry};
//!
//! let registry = ChainRegistry::global();
//!
//! if let Some(chain) = registry.lookup(56) {
//!     println!("{}: {:?}", chain.name(), chain.rpc_url());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/feedscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use feedscope_types::Chain;

/// The chain table embedded at compile time.
const CHAINS_JSON: &str = include_str!("../data/chains.json");

/// Global chain registry instance.
static REGISTRY: OnceLock<ChainRegistry> = OnceLock::new();

/// Lookup of chain metadata by chain id.
pub trait ChainDirectory: Send + Sync {
    /// Returns the entry for `chain_id`, if the chain is known.
    fn lookup(&self, chain_id: u64) -> Option<&Chain>;
}

impl<T: ChainDirectory + ?Sized> ChainDirectory for &T {
    fn lookup(&self, chain_id: u64) -> Option<&Chain> {
        (**self).lookup(chain_id)
    }
}

/// Registry of all supported chains.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: HashMap<u64, Chain>,
}

impl ChainRegistry {
    /// Returns the global chain registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads chains from the embedded JSON data.
    fn load() -> Self {
        let chains: Vec<Chain> = serde_json::from_str(CHAINS_JSON).expect("Invalid chains.json");
        Self::from_chains(chains)
    }

    /// Builds a registry from explicit entries. Later duplicates win.
    #[must_use]
    pub fn from_chains(chains: impl IntoIterator<Item = Chain>) -> Self {
        Self {
            chains: chains.into_iter().map(|c| (c.id(), c)).collect(),
        }
    }

    /// Looks up a chain by its id given as text (e.g., `"56"`).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chain> {
        id.trim().parse().ok().and_then(|id| self.chains.get(&id))
    }

    /// Returns all chains sorted by id.
    pub fn all(&self) -> Vec<&Chain> {
        let mut chains: Vec<&Chain> = self.chains.values().collect();
        chains.sort_by_key(|c| c.id());
        chains
    }

    /// Returns the total number of chains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns mainnet chains sorted by id.
    pub fn mainnets(&self) -> impl Iterator<Item = &Chain> {
        self.all().into_iter().filter(|c| !c.is_testnet())
    }

    /// Returns testnet chains sorted by id.
    pub fn testnets(&self) -> impl Iterator<Item = &Chain> {
        self.all().into_iter().filter(|c| c.is_testnet())
    }

    /// Searches chains by name (case-insensitive) or id prefix.
    pub fn search(&self, pattern: &str) -> Vec<&Chain> {
        let pattern = pattern.to_lowercase();
        self.all()
            .into_iter()
            .filter(|c| {
                c.name().to_lowercase().contains(&pattern) || c.id().to_string().starts_with(&pattern)
            })
            .collect()
    }
}

impl ChainDirectory for ChainRegistry {
    fn lookup(&self, chain_id: u64) -> Option<&Chain> {
        self.chains.get(&chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let registry = ChainRegistry::global();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_lookup_bsc() {
        let registry = ChainRegistry::global();
        let bsc = registry.lookup(56).expect("BSC should exist");
        assert_eq!(bsc.name(), "BNB Smart Chain");
        assert_eq!(bsc.rpc_url(), Some("https://rpc.ankr.com/bsc"));
        assert!(bsc.contract_address().is_some());
    }

    #[test]
    fn test_get_by_text() {
        let registry = ChainRegistry::global();
        assert!(registry.get("421613").is_some());
        assert!(registry.get(" 80001 ").is_some());
        assert!(registry.get("bsc").is_none());
        assert!(registry.get("999999").is_none());
    }

    #[test]
    fn test_chain_without_rpc() {
        let registry = ChainRegistry::global();
        let zkevm = registry.lookup(1101).expect("zkEVM should exist");
        assert!(zkevm.rpc_url().is_none());
    }

    #[test]
    fn test_testnet_filter() {
        let registry = ChainRegistry::global();
        let testnets: Vec<_> = registry.testnets().collect();
        assert!(!testnets.is_empty());
        assert!(testnets.iter().all(|c| c.is_testnet()));
        assert!(registry.mainnets().all(|c| !c.is_testnet()));
    }

    #[test]
    fn test_search() {
        let registry = ChainRegistry::global();
        assert!(!registry.search("arbitrum").is_empty());
        assert_eq!(registry.search("5").first().map(|c| c.id()), Some(56));
    }

    #[test]
    fn test_all_sorted() {
        let ids: Vec<_> = ChainRegistry::global().all().iter().map(|c| c.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
