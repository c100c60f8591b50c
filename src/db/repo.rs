use async_trait::async_trait;

use super::model::*;

/// A named key/value store that outlives the process, holding whole serialized values.
#[async_trait]
pub trait LocalStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> DbResult<Option<String>>;
    /// Replaces whatever was stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> DbResult<()>;
}
