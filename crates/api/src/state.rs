use std::sync::Arc;

use indiereel_db::names::DisplayNameResolver;
use indiereel_db::store::DocumentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store backend.
    pub store: Arc<dyn DocumentStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Cached display-name resolver shared by every request.
    pub names: Arc<DisplayNameResolver>,
}

impl AppState {
    /// The store as a trait object reference, as the repositories take it.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
