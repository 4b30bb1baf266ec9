//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

use crate::planner::EngineConfig;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`TRANSIT_BIND`).
    pub bind: SocketAddr,

    /// Network description loaded at start-up (`TRANSIT_NETWORK`).
    pub network_path: Option<PathBuf>,

    /// Engine limits (`TRANSIT_MAX_STOPS`, `TRANSIT_MAX_K_PATHS`).
    pub engine: EngineConfig,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. Values that fail to parse are
    /// logged and also keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let bind = parse_or("TRANSIT_BIND", &lookup, defaults.bind);
        let network_path = lookup("TRANSIT_NETWORK")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let engine = EngineConfig::new(
            parse_or("TRANSIT_MAX_STOPS", &lookup, defaults.engine.max_stops),
            parse_or("TRANSIT_MAX_K_PATHS", &lookup, defaults.engine.max_k_paths),
        );
        Self {
            bind,
            network_path,
            engine,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            network_path: None,
            engine: EngineConfig::default(),
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, fallback = %default, "ignoring unparseable setting");
            default
        }
    }
}
