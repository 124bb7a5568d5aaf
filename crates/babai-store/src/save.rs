//! The save blob: one JSON file holding the full [`PlayerState`].
//!
//! Written on every state change and read once at startup. Writes go
//! through a temp file followed by a rename so a crash mid-write never
//! corrupts the previous save. Rehydration runs a migration step that
//! clamps an oversized gallery from older saves down to the current cap.

use std::path::{Path, PathBuf};

use babai_state::{gallery, player, EconomyTuning};
use babai_types::PlayerState;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::StoreError;

/// Handle to the save file location.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    /// Create a store for the given save file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The save file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a save blob exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the save blob, or seed a fresh player when none exists.
    ///
    /// Rehydrated state is migrated: a gallery longer than the current
    /// cap is truncated, oldest entries first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing file cannot be read, or
    /// [`StoreError::Serialization`] if its contents are not a valid
    /// save blob.
    pub async fn load_or_init(
        &self,
        now: DateTime<Utc>,
        tuning: &EconomyTuning,
    ) -> Result<PlayerState, StoreError> {
        if !self.exists() {
            info!(path = %self.path.display(), "no save found, seeding fresh player");
            return Ok(player::new_player(now, tuning));
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut state: PlayerState = serde_json::from_str(&raw)?;

        let evicted = gallery::enforce_cap(&mut state, tuning.gallery_cap);
        if evicted > 0 {
            warn!(evicted, "migrated oversized gallery from older save");
        }

        info!(path = %self.path.display(), "save rehydrated");
        Ok(state)
    }

    /// Persist the full state, atomically.
    ///
    /// The blob is written to `<path>.tmp` and renamed over the previous
    /// save, so readers never observe a half-written file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if writing or renaming fails, or
    /// [`StoreError::Serialization`] if the state cannot be encoded.
    pub async fn save(&self, state: &PlayerState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let blob = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");

        tokio::fs::write(&tmp, &blob)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })
    }

    /// Delete the save blob (the destructive "reset" action).
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file exists but cannot be
    /// removed.
    pub async fn reset(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "save blob cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> SaveStore {
        let dir = std::env::temp_dir().join(format!("babai_store_{}", uuid::Uuid::now_v7()));
        SaveStore::new(dir.join("save.json"))
    }

    async fn cleanup(store: &SaveStore) {
        if let Some(parent) = store.path().parent() {
            let _ = tokio::fs::remove_dir_all(parent).await;
        }
    }

    #[tokio::test]
    async fn missing_save_seeds_fresh_player() {
        let store = temp_store();
        let tuning = EconomyTuning::default();

        let state = store.load_or_init(Utc::now(), &tuning).await;
        assert!(state.is_ok());
        assert_eq!(state.map(|s| s.energy).ok(), Some(50));
        assert!(!store.exists());
        cleanup(&store).await;
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = temp_store();
        let tuning = EconomyTuning::default();
        let now = Utc::now();

        let mut state = player::new_player(now, &tuning);
        state.fear = 123;
        state.inventory.insert(String::from("samovar"));

        assert!(store.save(&state).await.is_ok());
        assert!(store.exists());

        let loaded = store.load_or_init(now, &tuning).await;
        assert_eq!(loaded.ok(), Some(state));
        cleanup(&store).await;
    }

    #[tokio::test]
    async fn rehydration_truncates_oversized_gallery() {
        let store = temp_store();
        let tuning = EconomyTuning::default();
        let now = Utc::now();

        let mut state = player::new_player(now, &tuning);
        state.gallery = (0..12).map(|i| format!("old-{i}")).collect();
        assert!(store.save(&state).await.is_ok());

        let loaded = store.load_or_init(now, &tuning).await;
        assert_eq!(loaded.map(|s| s.gallery.len()).ok(), Some(6));
        cleanup(&store).await;
    }

    #[tokio::test]
    async fn reset_clears_the_blob_and_tolerates_absence() {
        let store = temp_store();
        let tuning = EconomyTuning::default();

        let state = player::new_player(Utc::now(), &tuning);
        assert!(store.save(&state).await.is_ok());
        assert!(store.reset().await.is_ok());
        assert!(!store.exists());
        // Second reset: nothing to delete, still fine.
        assert!(store.reset().await.is_ok());
        cleanup(&store).await;
    }

    #[tokio::test]
    async fn corrupt_blob_is_an_error() {
        let store = temp_store();
        let tuning = EconomyTuning::default();
        if let Some(parent) = store.path().parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        let _ = tokio::fs::write(store.path(), b"not json").await;

        let loaded = store.load_or_init(Utc::now(), &tuning).await;
        assert!(loaded.is_err());
        cleanup(&store).await;
    }
}
