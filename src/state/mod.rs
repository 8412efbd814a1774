use std::sync::Arc;
use std::time::Instant;

use crate::store::TributeStore;

/// Shared handler state. The store is selected once at startup and injected
/// here; handlers never construct their own adapter.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TributeStore>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<TributeStore>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }
}
