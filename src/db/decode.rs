//! Validation of stored playlist entries.
//!
//! Playlist records keep their entries as raw JSON so that a corrupt entry
//! never prevents the rest of the playlist from loading. Entries without an
//! integer `id`, or that otherwise fail to decode, are dropped here with a
//! logged reason.

use super::models::{Playlist, StoredPlaylist, Video};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("entry has no id")]
    MissingId,

    #[error("entry id {0} is not an integer")]
    InvalidId(String),

    #[error("entry is malformed: {0}")]
    Malformed(String),
}

pub fn decode_entry(value: &Value) -> Result<Video, Rejection> {
    let Some(fields) = value.as_object() else {
        return Err(Rejection::NotAnObject);
    };
    match fields.get("id") {
        None | Some(Value::Null) => return Err(Rejection::MissingId),
        Some(id) if id.as_i64().is_none() => return Err(Rejection::InvalidId(id.to_string())),
        Some(_) => {}
    }
    serde_json::from_value(value.clone()).map_err(|e| Rejection::Malformed(e.to_string()))
}

pub fn decode_playlist(stored: StoredPlaylist) -> Playlist {
    let mut videos = Vec::with_capacity(stored.videos.len());
    for (position, entry) in stored.videos.iter().enumerate() {
        match decode_entry(entry) {
            Ok(video) => videos.push(video),
            Err(reason) => log::warn!(
                "dropping entry {position} of playlist {} ({}): {reason}",
                stored.id,
                stored.name
            ),
        }
    }

    Playlist {
        id: stored.id,
        name: stored.name,
        description: stored.description,
        videos,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::PlaylistId;
    use chrono::Utc;
    use serde_json::json;

    fn entry(id: Value) -> Value {
        json!({
            "id": id,
            "url": "https://example.com/a.mp4",
            "title": "a",
            "last_watched": "2024-05-01T10:00:00Z",
        })
    }

    #[test]
    fn rejects_entries_without_integer_id() {
        assert_eq!(decode_entry(&json!("nope")), Err(Rejection::NotAnObject));
        assert_eq!(decode_entry(&entry(Value::Null)), Err(Rejection::MissingId));
        assert!(matches!(
            decode_entry(&entry(json!("7"))),
            Err(Rejection::InvalidId(_))
        ));
        assert!(matches!(
            decode_entry(&entry(json!(1.5))),
            Err(Rejection::InvalidId(_))
        ));
        assert!(matches!(
            decode_entry(&json!({ "id": 3 })),
            Err(Rejection::Malformed(_))
        ));
        assert_eq!(
            Rejection::InvalidId("\"7\"".into()).to_string(),
            "entry id \"7\" is not an integer"
        );
    }

    #[test]
    fn decode_playlist_keeps_valid_entries_in_order() {
        let now = Utc::now();
        let stored = StoredPlaylist {
            id: PlaylistId(7),
            name: "mixed".into(),
            description: String::new(),
            videos: vec![
                entry(json!(1)),
                json!(null),
                entry(json!("x")),
                entry(json!(2)),
                json!({ "url": "https://example.com/b.mp4" }),
                entry(json!(3)),
            ],
            created_at: now,
            updated_at: now,
        };

        let playlist = decode_playlist(stored);
        let ids: Vec<i64> = playlist.videos.iter().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(playlist.id, PlaylistId(7));
    }
}
