use std::sync::Arc;
use std::time::Instant;

use crate::store::{MemoryStore, SiteStore};

/// Shared handles for every request. Built once in `run()`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SiteStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }

    /// State backed by an empty [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
