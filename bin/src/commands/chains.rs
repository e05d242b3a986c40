//! Chains command implementation.
//!
//! This module handles listing chains with a known oracle deployment.

use crate::display::or_dash;
use anyhow::Result;
use feedscope_lib::prelude::*;

/// List known chains, optionally restricted to testnets or a search pattern.
pub(crate) fn list_chains(testnets: bool, search: Option<&str>) -> Result<()> {
    let registry = ChainRegistry::global();

    let chains: Vec<_> = match (testnets, search) {
        (_, Some(pattern)) => registry
            .search(pattern)
            .into_iter()
            .filter(|c| !testnets || c.is_testnet())
            .collect(),
        (true, None) => registry.testnets().collect(),
        (false, None) => registry.all(),
    };

    if chains.is_empty() {
        println!("No chains found.");
        return Ok(());
    }

    println!("{:<10} {:<24} {:<8} {}", "ID", "NAME", "TESTNET", "RPC");
    println!("{}", "-".repeat(80));

    for chain in &chains {
        println!(
            "{:<10} {:<24} {:<8} {}",
            chain.id(),
            chain.name(),
            if chain.is_testnet() { "yes" } else { "no" },
            or_dash(chain.rpc_url())
        );
    }

    println!("\nTotal: {} chains", chains.len());
    Ok(())
}
