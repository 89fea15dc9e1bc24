use std::sync::Arc;

use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::user_state::UserStateStore;

/// Assembles storage for the application controller.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self { storage })
    }

    /// Build services backed by process memory. Nothing survives a restart.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            storage: Storage::in_memory(),
        }
    }

    /// Load the learner's progression record.
    ///
    /// The returned store is the single owner of the record; pass it by
    /// reference to the flows that mutate it.
    pub async fn user_state(&self) -> UserStateStore {
        UserStateStore::load(Arc::clone(&self.storage.slots)).await
    }
}
