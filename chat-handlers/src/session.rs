//! Session lifecycle: deleting a conversation removes its turns and its
//! generated images together.

use std::sync::Arc;

use asset_store::AssetStore;
use message_store::MessageStore;
use pixchat_core::PixchatError;
use tracing::{info, instrument};

/// Deletes whole sessions across the message store and the asset store.
pub struct SessionManager {
    store: Arc<dyn MessageStore>,
    assets: Arc<dyn AssetStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn MessageStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { store, assets }
    }

    /// Removes every turn and every stored asset of a session. Returns
    /// `(turns_removed, assets_removed)`.
    #[instrument(skip(self))]
    pub async fn delete_session(&self, session_id: &str) -> Result<(u64, u64), PixchatError> {
        let turns_removed = self
            .store
            .delete_session(session_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;
        let assets_removed = self
            .assets
            .delete_folder(session_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;

        info!(session_id, turns_removed, assets_removed, "Session deleted");
        Ok((turns_removed, assets_removed))
    }
}
