//! Shared application state for all routes. The store is built once at startup and injected here.

use crate::store::InventoryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
}

impl AppState {
    pub fn new<S: InventoryStore + 'static>(store: S) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn InventoryStore {
        self.store.as_ref()
    }
}
