//! Engine configuration.

/// Configuration for the date-to-block resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Lowest block considered by the search.
    pub genesis_block: u64,
    /// Upper bound on binary search steps.
    pub max_iterations: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            genesis_block: 0,
            max_iterations: 64,
        }
    }
}

/// Configuration for the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Maximum reads in flight. 1 samples strictly sequentially.
    pub concurrency: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { concurrency: 1 }
    }
}

/// Combined engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Date-to-block resolver settings.
    pub resolver: ResolverConfig,
    /// Sampler settings.
    pub sampler: SamplerConfig,
}
