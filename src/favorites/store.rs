use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::set::FavoriteSet;
use crate::db::{DbResult, LocalStorage};
use crate::model::Movie;

/// Owns the persisted favorites entry.
///
/// Every mutation rewrites the whole entry; there is no partial update.
pub struct FavoritesStore {
    storage: Arc<dyn LocalStorage>,
    key: String,
    write_lock: Mutex<()>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn LocalStorage>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the persisted set for display. Missing, malformed or unreadable
    /// entries yield an empty set.
    pub async fn load(&self) -> FavoriteSet {
        match self.try_load().await {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Failed to read favorites: {}", e);
                FavoriteSet::new()
            }
        }
    }

    /// Reads the persisted set, failing if storage could not be read.
    ///
    /// A missing or malformed entry is still an empty set: only a storage
    /// error means the current value is unknown.
    pub async fn try_load(&self) -> DbResult<FavoriteSet> {
        let raw = match self.storage.get_item(&self.key).await? {
            Some(raw) => raw,
            None => return Ok(FavoriteSet::new()),
        };

        match serde_json::from_str::<Vec<Movie>>(&raw) {
            Ok(movies) => Ok(movies.into_iter().collect()),
            Err(e) => {
                warn!("Ignoring malformed favorites entry: {}", e);
                Ok(FavoriteSet::new())
            }
        }
    }

    /// Removes `movie` if it is present, adds it otherwise.
    pub fn toggle(current: &FavoriteSet, movie: &Movie) -> FavoriteSet {
        let mut next = current.clone();
        if !next.remove(movie.id) {
            next.insert(movie.clone());
        }
        next
    }

    pub async fn persist(&self, favorites: &FavoriteSet) -> DbResult<()> {
        let value = serde_json::to_string(favorites).unwrap_or_else(|_| "[]".to_string());
        self.storage.set_item(&self.key, &value).await?;
        debug!("Persisted {} favorites", favorites.len());
        Ok(())
    }

    /// Toggles `movie` against the persisted set and writes the result back.
    ///
    /// If the persisted set cannot be read nothing is written and the error is
    /// returned. A failed write is logged and the toggled set is still
    /// returned, so the caller's view and storage can drift apart until the
    /// next successful write.
    pub async fn toggle_and_persist(&self, movie: &Movie) -> DbResult<FavoriteSet> {
        let _guard = self.write_lock.lock().await;
        let current = self.try_load().await?;
        let next = Self::toggle(&current, movie);
        self.persist_logged(&next).await;
        Ok(next)
    }

    pub async fn remove_and_persist(&self, id: i64) -> DbResult<FavoriteSet> {
        let _guard = self.write_lock.lock().await;
        let mut next = self.try_load().await?;
        if next.remove(id) {
            self.persist_logged(&next).await;
        }
        Ok(next)
    }

    async fn persist_logged(&self, favorites: &FavoriteSet) {
        if let Err(e) = self.persist(favorites).await {
            error!("Failed to persist favorites: {}", e);
        }
    }
}
