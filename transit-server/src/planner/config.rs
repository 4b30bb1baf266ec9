//! Engine limits.

/// Configuration parameters for the network engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Largest stop id a network may use.
    /// Building a network with more stops fails with `CapacityExceeded`.
    pub max_stops: u32,

    /// Largest `k` accepted for k-best path queries from outside callers.
    pub max_k_paths: usize,
}

impl EngineConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_stops: u32, max_k_paths: usize) -> Self {
        Self {
            max_stops,
            max_k_paths,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_stops: 100_000,
            max_k_paths: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.max_stops, 100_000);
        assert_eq!(config.max_k_paths, 1_000);
    }

    #[test]
    fn custom_config() {
        let config = EngineConfig::new(50, 3);

        assert_eq!(config.max_stops, 50);
        assert_eq!(config.max_k_paths, 3);
    }
}
