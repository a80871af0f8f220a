use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a record in the `videos` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub i64);

/// Identity of a record in the `playlists` collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(pub i64);

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A watch-history entry. Playlists hold their own copies of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub custom_title: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>, // seconds
    pub last_watched: DateTime<Utc>,
}

impl Video {
    pub fn display_title(&self) -> &str {
        match self.custom_title.as_deref() {
            Some(custom) if !custom.trim().is_empty() => custom,
            _ => &self.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVideo {
    pub url: String,
    pub title: String,
    pub custom_title: Option<String>,
    pub duration: Option<f64>,
    pub last_watched: DateTime<Utc>,
}

impl NewVideo {
    pub fn into_video(self, id: VideoId) -> Video {
        Video {
            id,
            url: self.url,
            title: self.title,
            custom_title: self.custom_title,
            duration: self.duration,
            last_watched: self.last_watched,
        }
    }
}

/// Partial update for a video record; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub custom_title: Option<Option<String>>,
    pub duration: Option<Option<f64>>,
    pub last_watched: Option<DateTime<Utc>>,
}

impl VideoPatch {
    pub fn apply(self, video: &mut Video) {
        if let Some(title) = self.title {
            video.title = title;
        }
        if let Some(custom_title) = self.custom_title {
            video.custom_title = custom_title;
        }
        if let Some(duration) = self.duration {
            video.duration = duration;
        }
        if let Some(last_watched) = self.last_watched {
            video.last_watched = last_watched;
        }
    }
}

/// A named, ordered collection of video snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Playlist {
    pub fn position_of(&self, id: VideoId) -> Option<usize> {
        self.videos.iter().position(|v| v.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a playlist record. `videos` replaces the whole sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub videos: Option<Vec<Video>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlaylistPatch {
    pub fn videos(videos: Vec<Video>, updated_at: DateTime<Utc>) -> Self {
        Self {
            videos: Some(videos),
            updated_at: Some(updated_at),
            ..Self::default()
        }
    }
}

/// A playlist as it sits in storage: entries are kept as raw JSON until decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlaylist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub videos: Vec<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredPlaylist {
    pub fn apply(&mut self, patch: PlaylistPatch) -> Result<(), serde_json::Error> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(videos) = patch.videos {
            self.videos = encode_videos(&videos)?;
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
        Ok(())
    }
}

pub fn encode_videos(videos: &[Video]) -> Result<Vec<serde_json::Value>, serde_json::Error> {
    videos.iter().map(serde_json::to_value).collect()
}
