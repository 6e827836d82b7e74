//! Application state for the web layer.

use std::sync::Arc;

use crate::planner::Optimizer;

/// Shared application state.
///
/// Generic over the providers so the router can be driven by mocks.
pub struct AppState<G, D, C> {
    /// Route optimization pipeline
    pub optimizer: Arc<Optimizer<G, D, C>>,
}

impl<G, D, C> AppState<G, D, C> {
    /// Create a new app state.
    pub fn new(optimizer: Optimizer<G, D, C>) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
        }
    }
}

impl<G, D, C> Clone for AppState<G, D, C> {
    fn clone(&self) -> Self {
        Self {
            optimizer: Arc::clone(&self.optimizer),
        }
    }
}
