//! Persistent store: the `videos`, `playlists` and `settings` collections.
//!
//! Native builds keep everything in SQLite; the browser build keeps it in
//! `localStorage`. Both sit behind [`MediaStore`] so the playlist engine and
//! the library operations never know which one they are talking to.

mod decode;
#[cfg(any(test, target_arch = "wasm32"))]
mod memory;
mod models;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(not(target_arch = "wasm32"))]
mod sqlite;

#[cfg(any(test, target_arch = "wasm32"))]
pub use memory::MemoryStore;
pub use models::*;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
pub use sqlite::SqliteStore;

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const SETTINGS_KEY: &str = "app_settings";
pub const FIRST_VISIT_KEY: &str = "is_first_visit";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: i64 },
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::Serialization(e.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::Sqlite(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_storage::errors::StorageError> for DbError {
    fn from(e: gloo_storage::errors::StorageError) -> Self {
        DbError::Storage(e.to_string())
    }
}

/// The record collections the app reads and writes.
///
/// All calls are awaited from the UI's single thread; implementations are not
/// required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait MediaStore {
    async fn add_video(&self, video: NewVideo) -> Result<VideoId, DbError>;
    async fn get_video(&self, id: VideoId) -> Result<Option<Video>, DbError>;
    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>, DbError>;
    async fn update_video(&self, id: VideoId, patch: VideoPatch) -> Result<(), DbError>;
    async fn delete_video(&self, id: VideoId) -> Result<(), DbError>;
    /// Most recently watched first.
    async fn recent_videos(&self, limit: usize) -> Result<Vec<Video>, DbError>;

    async fn add_playlist(&self, playlist: NewPlaylist) -> Result<PlaylistId, DbError>;
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>, DbError>;
    async fn list_playlists(&self) -> Result<Vec<Playlist>, DbError>;
    async fn update_playlist(&self, id: PlaylistId, patch: PlaylistPatch) -> Result<(), DbError>;
    async fn delete_playlist(&self, id: PlaylistId) -> Result<(), DbError>;

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DbError>;
    async fn put_setting(&self, key: &str, value: Value) -> Result<(), DbError>;
}

/// App settings stored in the `settings` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_autoplay_next")]
    pub autoplay_next: bool,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,
    #[serde(default)]
    pub language: Language,
}

fn default_autoplay_next() -> bool {
    true
}

fn default_recent_limit() -> usize {
    10
}

fn default_toast_duration_ms() -> u32 {
    3500
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            autoplay_next: default_autoplay_next(),
            recent_limit: default_recent_limit(),
            toast_duration_ms: default_toast_duration_ms(),
            language: Language::default(),
        }
    }
}

pub const RECENT_LIMIT_RANGE: (usize, usize) = (1, 50);
pub const TOAST_DURATION_RANGE_MS: (u32, u32) = (1000, 10_000);

impl AppSettings {
    /// Pulls every numeric setting back into its allowed range.
    pub fn normalized(mut self) -> Self {
        self.recent_limit = self
            .recent_limit
            .clamp(RECENT_LIMIT_RANGE.0, RECENT_LIMIT_RANGE.1);
        self.toast_duration_ms = self
            .toast_duration_ms
            .clamp(TOAST_DURATION_RANGE_MS.0, TOAST_DURATION_RANGE_MS.1);
        self
    }
}

pub async fn load_settings<S: MediaStore>(store: &S) -> AppSettings {
    match store.get_setting(SETTINGS_KEY).await {
        Ok(Some(value)) => serde_json::from_value::<AppSettings>(value)
            .map(AppSettings::normalized)
            .unwrap_or_else(|e| {
                log::warn!("stored settings are unreadable, using defaults: {e}");
                AppSettings::default()
            }),
        Ok(None) => AppSettings::default(),
        Err(e) => {
            log::warn!("failed to load settings, using defaults: {e}");
            AppSettings::default()
        }
    }
}

pub async fn save_settings<S: MediaStore>(store: &S, settings: &AppSettings) -> Result<(), DbError> {
    store
        .put_setting(SETTINGS_KEY, serde_json::to_value(settings)?)
        .await
}

#[cfg(not(target_arch = "wasm32"))]
pub type AppStore = SqliteStore;

#[cfg(target_arch = "wasm32")]
pub type AppStore = LocalStore;

/// Opens the store for the current platform.
///
/// Natively, a database that cannot be opened on disk is replaced by an
/// in-memory one so the session still works.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_store() -> Result<AppStore, DbError> {
    let path = sqlite::default_db_path();
    match SqliteStore::open(&path) {
        Ok(store) => {
            log::info!("opened database at {}", path.display());
            Ok(store)
        }
        Err(e) => {
            log::error!(
                "failed to open database at {}: {e}; history will not survive a restart",
                path.display()
            );
            SqliteStore::open_in_memory()
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn open_store() -> Result<AppStore, DbError> {
    Ok(LocalStore::open())
}
