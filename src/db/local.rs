//! Browser store: the collections live in `localStorage` as one JSON document.

use super::memory::{Collections, MemoryStore};
use super::models::*;
use super::{DbError, MediaStore};
use gloo_storage::{LocalStorage, Storage};
use serde_json::Value;
use std::future::Future;

const COLLECTIONS_KEY: &str = "reelshelf.collections";

pub struct LocalStore {
    memory: MemoryStore,
}

impl LocalStore {
    pub fn open() -> Self {
        let collections = match LocalStorage::get::<Collections>(COLLECTIONS_KEY) {
            Ok(collections) => collections,
            Err(e) => {
                log::info!("starting with empty local storage ({e})");
                Collections::default()
            }
        };
        Self {
            memory: MemoryStore::from_collections(collections),
        }
    }

    fn flush(&self) -> Result<(), DbError> {
        LocalStorage::set(COLLECTIONS_KEY, self.memory.collections())?;
        Ok(())
    }

    /// Runs a mutation against the in-memory copy and writes the result
    /// through. A failed write restores the in-memory copy.
    async fn write<T, F>(&self, op: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, DbError>>,
    {
        let before = self.memory.collections();
        let out = op.await?;
        if let Err(e) = self.flush() {
            self.memory.replace_collections(before);
            return Err(e);
        }
        Ok(out)
    }
}

impl MediaStore for LocalStore {
    async fn add_video(&self, video: NewVideo) -> Result<VideoId, DbError> {
        self.write(self.memory.add_video(video)).await
    }

    async fn get_video(&self, id: VideoId) -> Result<Option<Video>, DbError> {
        self.memory.get_video(id).await
    }

    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>, DbError> {
        self.memory.find_video_by_url(url).await
    }

    async fn update_video(&self, id: VideoId, patch: VideoPatch) -> Result<(), DbError> {
        self.write(self.memory.update_video(id, patch)).await
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), DbError> {
        self.write(self.memory.delete_video(id)).await
    }

    async fn recent_videos(&self, limit: usize) -> Result<Vec<Video>, DbError> {
        self.memory.recent_videos(limit).await
    }

    async fn add_playlist(&self, playlist: NewPlaylist) -> Result<PlaylistId, DbError> {
        self.write(self.memory.add_playlist(playlist)).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>, DbError> {
        self.memory.get_playlist(id).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>, DbError> {
        self.memory.list_playlists().await
    }

    async fn update_playlist(&self, id: PlaylistId, patch: PlaylistPatch) -> Result<(), DbError> {
        self.write(self.memory.update_playlist(id, patch)).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<(), DbError> {
        self.write(self.memory.delete_playlist(id)).await
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DbError> {
        self.memory.get_setting(key).await
    }

    async fn put_setting(&self, key: &str, value: Value) -> Result<(), DbError> {
        self.write(self.memory.put_setting(key, value)).await
    }
}
