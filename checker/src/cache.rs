//! Channel ID to display name cache.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Remembers the display name of every channel we have looked up.
///
/// Entries are never evicted or expired: channel names are assumed not to change for the
/// lifetime of the process, and the set of watched channels is small. Keys are used exactly as
/// given, so two spellings of the same channel are two separate entries.
///
/// Create one at startup and share it (typically behind an `Arc`) between everything that
/// resolves channel names. Writes are plain overwrites, so concurrent updates for the same
/// channel are harmless.
#[derive(Debug, Default)]
pub struct ChannelNameCache {
    names: RwLock<HashMap<String, String>>,
}

impl ChannelNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn has(&self, channel_id: &str) -> bool {
        self.names.read().await.contains_key(channel_id)
    }

    pub async fn get(&self, channel_id: &str) -> Option<String> {
        self.names.read().await.get(channel_id).cloned()
    }

    /// Records `name` for `channel_id`, replacing any previous name.
    pub async fn set(&self, channel_id: impl Into<String>, name: impl Into<String>) {
        let channel_id = channel_id.into();
        let name = name.into();
        tracing::trace!(channel = %channel_id, %name, "caching channel name");
        self.names.write().await.insert(channel_id, name);
    }

    pub async fn len(&self) -> usize {
        self.names.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.names.read().await.is_empty()
    }
}
