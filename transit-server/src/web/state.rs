//! Application state for the web layer.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::network::TransitNetwork;

use super::routes::AppError;

/// Shared application state.
///
/// The network sits behind a single-writer lock: queries share read
/// access, route changes and rebuilds take it exclusively.
#[derive(Clone)]
pub struct AppState {
    network: Arc<RwLock<TransitNetwork>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: TransitNetwork) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
        }
    }

    /// Shared access for queries.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, TransitNetwork>, AppError> {
        self.network.read().map_err(|_| AppError::Internal {
            message: "network lock poisoned".to_string(),
        })
    }

    /// Exclusive access for mutations.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, TransitNetwork>, AppError> {
        self.network.write().map_err(|_| AppError::Internal {
            message: "network lock poisoned".to_string(),
        })
    }
}
