//! Native store backed by SQLite.

use super::decode::decode_playlist;
use super::models::*;
use super::{DbError, MediaStore};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;
use std::path::{Path, PathBuf};

const DB_PATH_ENV: &str = "REELSHELF_DB";

pub fn default_db_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelshelf")
        .join("reelshelf.db")
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DbError::Sqlite(format!("failed to create {}: {e}", parent.display())))?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS videos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                title TEXT NOT NULL,
                custom_title TEXT,
                duration REAL,
                last_watched TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS playlists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                videos TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_videos_last_watched ON videos(last_watched);
            CREATE INDEX IF NOT EXISTS idx_videos_url ON videos(url);
            "#,
        )?;
        Ok(Self { conn })
    }

    fn load_video(&self, id: VideoId) -> Result<Option<Video>, DbError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, url, title, custom_title, duration, last_watched FROM videos WHERE id = ?1",
                params![id.0],
                RawVideo::from_row,
            )
            .optional()?;
        raw.map(RawVideo::into_video).transpose()
    }

    fn load_stored_playlist(&self, id: PlaylistId) -> Result<Option<StoredPlaylist>, DbError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, name, description, videos, created_at, updated_at FROM playlists WHERE id = ?1",
                params![id.0],
                RawPlaylist::from_row,
            )
            .optional()?;
        raw.map(RawPlaylist::into_stored).transpose()
    }
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DbError::Serialization(format!("bad timestamp {raw:?}: {e}")))
}

struct RawVideo {
    id: i64,
    url: String,
    title: String,
    custom_title: Option<String>,
    duration: Option<f64>,
    last_watched: String,
}

impl RawVideo {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            custom_title: row.get(3)?,
            duration: row.get(4)?,
            last_watched: row.get(5)?,
        })
    }

    fn into_video(self) -> Result<Video, DbError> {
        Ok(Video {
            id: VideoId(self.id),
            url: self.url,
            title: self.title,
            custom_title: self.custom_title,
            duration: self.duration,
            last_watched: parse_timestamp(&self.last_watched)?,
        })
    }
}

struct RawPlaylist {
    id: i64,
    name: String,
    description: String,
    videos: String,
    created_at: String,
    updated_at: String,
}

impl RawPlaylist {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            videos: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_stored(self) -> Result<StoredPlaylist, DbError> {
        let videos = match serde_json::from_str::<Value>(&self.videos) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) | Err(_) => {
                log::warn!(
                    "playlist {} has an unreadable video list, treating it as empty",
                    self.id
                );
                Vec::new()
            }
        };
        Ok(StoredPlaylist {
            id: PlaylistId(self.id),
            name: self.name,
            description: self.description,
            videos,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

impl MediaStore for SqliteStore {
    async fn add_video(&self, video: NewVideo) -> Result<VideoId, DbError> {
        self.conn.execute(
            "INSERT INTO videos (url, title, custom_title, duration, last_watched) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                video.url,
                video.title,
                video.custom_title,
                video.duration,
                timestamp(&video.last_watched),
            ],
        )?;
        Ok(VideoId(self.conn.last_insert_rowid()))
    }

    async fn get_video(&self, id: VideoId) -> Result<Option<Video>, DbError> {
        self.load_video(id)
    }

    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>, DbError> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, url, title, custom_title, duration, last_watched FROM videos WHERE url = ?1 ORDER BY id LIMIT 1",
                params![url],
                RawVideo::from_row,
            )
            .optional()?;
        raw.map(RawVideo::into_video).transpose()
    }

    async fn update_video(&self, id: VideoId, patch: VideoPatch) -> Result<(), DbError> {
        let mut video = self.load_video(id)?.ok_or(DbError::NotFound {
            collection: "videos",
            id: id.0,
        })?;
        patch.apply(&mut video);
        self.conn.execute(
            "UPDATE videos SET title = ?1, custom_title = ?2, duration = ?3, last_watched = ?4 WHERE id = ?5",
            params![
                video.title,
                video.custom_title,
                video.duration,
                timestamp(&video.last_watched),
                id.0,
            ],
        )?;
        Ok(())
    }

    async fn delete_video(&self, id: VideoId) -> Result<(), DbError> {
        let changed = self
            .conn
            .execute("DELETE FROM videos WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(DbError::NotFound {
                collection: "videos",
                id: id.0,
            });
        }
        Ok(())
    }

    async fn recent_videos(&self, limit: usize) -> Result<Vec<Video>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, custom_title, duration, last_watched FROM videos ORDER BY last_watched DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], RawVideo::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(RawVideo::into_video).collect()
    }

    async fn add_playlist(&self, playlist: NewPlaylist) -> Result<PlaylistId, DbError> {
        let videos = serde_json::to_string(&playlist.videos)?;
        self.conn.execute(
            "INSERT INTO playlists (name, description, videos, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                playlist.name,
                playlist.description,
                videos,
                timestamp(&playlist.created_at),
                timestamp(&playlist.updated_at),
            ],
        )?;
        Ok(PlaylistId(self.conn.last_insert_rowid()))
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>, DbError> {
        Ok(self.load_stored_playlist(id)?.map(decode_playlist))
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, videos, created_at, updated_at FROM playlists ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], RawPlaylist::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter()
            .map(|raw| raw.into_stored().map(decode_playlist))
            .collect()
    }

    async fn update_playlist(&self, id: PlaylistId, patch: PlaylistPatch) -> Result<(), DbError> {
        let mut stored = self.load_stored_playlist(id)?.ok_or(DbError::NotFound {
            collection: "playlists",
            id: id.0,
        })?;
        stored.apply(patch)?;
        self.conn.execute(
            "UPDATE playlists SET name = ?1, description = ?2, videos = ?3, updated_at = ?4 WHERE id = ?5",
            params![
                stored.name,
                stored.description,
                serde_json::to_string(&stored.videos)?,
                timestamp(&stored.updated_at),
                id.0,
            ],
        )?;
        Ok(())
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<(), DbError> {
        let changed = self
            .conn
            .execute("DELETE FROM playlists WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(DbError::NotFound {
                collection: "playlists",
                id: id.0,
            });
        }
        Ok(())
    }

    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DbError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put_setting(&self, key: &str, value: Value) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, serde_json::to_string(&value)?],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn new_video(url: &str, minutes: i64) -> NewVideo {
        NewVideo {
            url: url.to_string(),
            title: url.rsplit('/').next().unwrap_or(url).to_string(),
            custom_title: None,
            duration: None,
            last_watched: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("library.db");

        let video_id;
        let playlist_id;
        {
            let store = SqliteStore::open(&path).unwrap();
            video_id = store.add_video(new_video("https://x/a.mp4", 0)).await.unwrap();
            let video = store.get_video(video_id).await.unwrap().unwrap();
            let now = Utc::now();
            playlist_id = store
                .add_playlist(NewPlaylist {
                    name: "Saved".into(),
                    description: "kept".into(),
                    videos: vec![video],
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
            store.put_setting("flag", json!(false)).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let playlist = store.get_playlist(playlist_id).await.unwrap().unwrap();
        assert_eq!(playlist.name, "Saved");
        assert_eq!(playlist.videos.len(), 1);
        assert_eq!(playlist.videos[0].id, video_id);
        assert_eq!(store.get_setting("flag").await.unwrap(), Some(json!(false)));
    }

    #[tokio::test]
    async fn recent_videos_follow_last_watched() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.add_video(new_video("https://x/a", 10)).await.unwrap();
        let b = store.add_video(new_video("https://x/b", 0)).await.unwrap();
        let c = store.add_video(new_video("https://x/c", 5)).await.unwrap();

        let ids: Vec<VideoId> = store
            .recent_videos(10)
            .await
            .unwrap()
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![a, c, b]);

        store
            .update_video(
                b,
                VideoPatch {
                    last_watched: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
                    ..VideoPatch::default()
                },
            )
            .await
            .unwrap();
        let newest = store.recent_videos(1).await.unwrap();
        assert_eq!(newest[0].id, b);
    }

    #[tokio::test]
    async fn corrupt_playlist_entries_are_dropped_on_load() {
        let store = SqliteStore::open_in_memory().unwrap();
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
        let entries = json!([
            { "id": 4, "url": "https://x/d", "title": "d", "last_watched": timestamp(&now) },
            { "url": "https://x/e", "title": "e", "last_watched": timestamp(&now) },
            { "id": "5", "url": "https://x/f", "title": "f", "last_watched": timestamp(&now) }
        ]);
        store
            .conn
            .execute(
                "UPDATE playlists SET videos = ?1 WHERE id = ?2",
                params![entries.to_string(), id.0],
            )
            .unwrap();

        let playlist = store.get_playlist(id).await.unwrap().unwrap();
        assert_eq!(playlist.videos.len(), 1);
        assert_eq!(playlist.videos[0].id, VideoId(4));
    }

    #[tokio::test]
    async fn missing_records_report_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .update_video(VideoId(42), VideoPatch::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DbError::NotFound {
                collection: "videos",
                id: 42
            }
        );
        assert!(store.get_playlist(PlaylistId(1)).await.unwrap().is_none());
    }
}
