use super::decode::decode_playlist;
use super::models::*;
use super::{DbError, MediaStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Every collection in one serializable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub videos: BTreeMap<i64, Video>,
    #[serde(default)]
    pub playlists: BTreeMap<i64, StoredPlaylist>,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
    #[serde(default)]
    pub next_video_id: i64,
    #[serde(default)]
    pub next_playlist_id: i64,
}

impl Collections {
    fn allocate_video_id(&mut self) -> VideoId {
        let floor = self.videos.keys().next_back().copied().unwrap_or(0);
        self.next_video_id = self.next_video_id.max(floor) + 1;
        VideoId(self.next_video_id)
    }

    fn allocate_playlist_id(&mut self) -> PlaylistId {
        let floor = self.playlists.keys().next_back().copied().unwrap_or(0);
        self.next_playlist_id = self.next_playlist_id.max(floor) + 1;
        PlaylistId(self.next_playlist_id)
    }
}

/// In-process store. Backs the browser store and the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Collections>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn from_collections(data: Collections) -> Self {
        Self {
            data: RefCell::new(data),
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn collections(&self) -> Collections {
        self.data.borrow().clone()
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn replace_collections(&self, data: Collections) {
        *self.data.borrow_mut() = data;
    }

    #[cfg(test)]
    pub fn video_count(&self) -> usize {
        self.data.borrow().videos.len()
    }
}

impl MediaStore for MemoryStore {
    async fn add_video(&self, video: NewVideo) -> Result<VideoId, DbError> {
        let mut data = self.data.borrow_mut();
        let id = data.allocate_video_id();
        data.videos.insert(id.0, video.into_video(id));
        Ok(id)
    }

    async fn get_video(&self, id: VideoId) -> Result<Option<Video>, DbError> {
        Ok(self.data.borrow().videos.get(&id.0).cloned())
    }

    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>, DbError> {
        Ok(self
            .data
            .borrow()
            .videos
            .values()
            .find(|v| v.url == url)
            .cloned())
    }

    async fn update_video(&self, id: VideoId, patch: VideoPatch) -> Result<(), DbError> {
        let mut data = self.data.borrow_mut();
        let video = data.videos.get_mut(&id.0).ok_or(DbError::NotFound {
            collection: "videos",
            id: id.0,
        })?;
        patch.apply(video);
        Ok(())
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), DbError> {
        match self.data.borrow_mut().videos.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(DbError::NotFound {
                collection: "videos",
                id: id.0,
            }),
        }
    }

    async fn recent_videos(&self, limit: usize) -> Result<Vec<Video>, DbError> {
        let mut videos: Vec<Video> = self.data.borrow().videos.values().cloned().collect();
        videos.sort_by(|a, b| {
            b.last_watched
                .cmp(&a.last_watched)
                .then_with(|| b.id.cmp(&a.id))
        });
        videos.truncate(limit);
        Ok(videos)
    }

    async fn add_playlist(&self, playlist: NewPlaylist) -> Result<PlaylistId, DbError> {
        let videos = encode_videos(&playlist.videos)?;
        let mut data = self.data.borrow_mut();
        let id = data.allocate_playlist_id();
        data.playlists.insert(
            id.0,
            StoredPlaylist {
                id,
                name: playlist.name,
                description: playlist.description,
                videos,
                created_at: playlist.created_at,
                updated_at: playlist.updated_at,
            },
        );
        Ok(id)
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>, DbError> {
        let stored = self.data.borrow().playlists.get(&id.0).cloned();
        Ok(stored.map(decode_playlist))
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>, DbError> {
        let stored: Vec<StoredPlaylist> = self.data.borrow().playlists.values().cloned().collect();
        let mut playlists: Vec<Playlist> = stored.into_iter().map(decode_playlist).collect();
        playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(playlists)
    }

    async fn update_playlist(&self, id: PlaylistId, patch: PlaylistPatch) -> Result<(), DbError> {
        let mut data = self.data.borrow_mut();
        let playlist = data.playlists.get_mut(&id.0).ok_or(DbError::NotFound {
            collection: "playlists",
            id: id.0,
        })?;
        playlist.apply(patch)?;
        Ok(())
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<(), DbError> {
        match self.data.borrow_mut().playlists.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(DbError::NotFound {
                collection: "playlists",
                id: id.0,
            }),
        }
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DbError> {
        Ok(self.data.borrow().settings.get(key).cloned())
    }

    async fn put_setting(&self, key: &str, value: Value) -> Result<(), DbError> {
        self.data.borrow_mut().settings.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn new_video(url: &str, minutes: i64) -> NewVideo {
        NewVideo {
            url: url.to_string(),
            title: url.rsplit('/').next().unwrap_or(url).to_string(),
            custom_title: None,
            duration: Some(60.0),
            last_watched: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn ids_are_unique_and_never_reused() {
        let store = MemoryStore::new();
        let a = store.add_video(new_video("https://x/a", 0)).await.unwrap();
        let b = store.add_video(new_video("https://x/b", 1)).await.unwrap();
        assert_ne!(a, b);

        store.delete_video(b).await.unwrap();
        let c = store.add_video(new_video("https://x/c", 2)).await.unwrap();
        assert!(c > b);
    }

    #[tokio::test]
    async fn recent_videos_are_newest_first_and_limited() {
        let store = MemoryStore::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            store
                .add_video(new_video(&format!("https://x/{name}"), i as i64))
                .await
                .unwrap();
        }

        let recent = store.recent_videos(3).await.unwrap();
        let titles: Vec<&str> = recent.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "c", "b"]);
    }

    #[tokio::test]
    async fn playlist_updates_replace_the_whole_sequence() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let id = store
            .add_playlist(NewPlaylist {
                name: "p".into(),
                description: String::new(),
                videos: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let v = store.add_video(new_video("https://x/a", 0)).await.unwrap();
        let video = store.get_video(v).await.unwrap().unwrap();
        let later = now + Duration::seconds(5);
        store
            .update_playlist(id, PlaylistPatch::videos(vec![video.clone()], later))
            .await
            .unwrap();

        let playlist = store.get_playlist(id).await.unwrap().unwrap();
        assert_eq!(playlist.videos, vec![video]);
        assert_eq!(playlist.updated_at, later);

        let missing = store
            .update_playlist(PlaylistId(99), PlaylistPatch::default())
            .await;
        assert_eq!(
            missing,
            Err(DbError::NotFound {
                collection: "playlists",
                id: 99
            })
        );
    }
}
