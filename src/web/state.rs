//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::storage::Storage;

pub struct AppState {
    pub storage: Storage,
}

/// Handlers hold the lock for the whole of one engine call, so every
/// request's reads and writes are applied as a unit.
pub type SharedState = Arc<Mutex<AppState>>;

pub fn shared(storage: Storage) -> SharedState {
    Arc::new(Mutex::new(AppState { storage }))
}
