//! Watch history and playlist bookkeeping outside of a single playlist view.

use crate::db::{
    DbError, MediaStore, NewPlaylist, NewVideo, Playlist, PlaylistId, PlaylistPatch, Video,
    VideoId, VideoPatch, FIRST_VISIT_KEY,
};
use crate::playback::{PlaybackPointer, PlaybackStore};
use crate::utils::title_from_url;
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LibraryError {
    #[error("not a playable link: {0}")]
    InvalidUrl(String),

    #[error("playlist name cannot be empty")]
    EmptyName,

    #[error("video {0} not found")]
    VideoNotFound(VideoId),

    #[error("playlist {0} not found")]
    PlaylistNotFound(PlaylistId),

    #[error(transparent)]
    Db(#[from] DbError),
}

fn is_http_url(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && url.len() > scheme.len()
    })
}

/// Records a watch of `url`, creating the history entry if needed.
pub async fn ingest_url<S: MediaStore>(store: &S, url: &str) -> Result<Video, LibraryError> {
    let url = url.trim();
    if !is_http_url(url) {
        return Err(LibraryError::InvalidUrl(url.to_string()));
    }

    let now = Utc::now();
    if let Some(mut existing) = store.find_video_by_url(url).await? {
        store
            .update_video(
                existing.id,
                VideoPatch {
                    last_watched: Some(now),
                    ..Default::default()
                },
            )
            .await?;
        existing.last_watched = now;
        return Ok(existing);
    }

    let new = NewVideo {
        url: url.to_string(),
        title: title_from_url(url),
        custom_title: None,
        duration: None,
        last_watched: now,
    };
    let id = store.add_video(new.clone()).await?;
    log::info!("added {url} to history as video {id}");
    Ok(new.into_video(id))
}

pub async fn recent_history<S: MediaStore>(store: &S, limit: usize) -> Result<Vec<Video>, LibraryError> {
    Ok(store.recent_videos(limit).await?)
}

/// Stores the duration reported by the player, if it changed.
pub async fn record_duration<S: MediaStore>(
    store: &S,
    id: VideoId,
    seconds: f64,
) -> Result<(), LibraryError> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Ok(());
    }
    let Some(video) = store.get_video(id).await? else {
        return Err(LibraryError::VideoNotFound(id));
    };
    if video.duration == Some(seconds) {
        return Ok(());
    }
    store
        .update_video(
            id,
            VideoPatch {
                duration: Some(Some(seconds)),
                ..Default::default()
            },
        )
        .await?;
    Ok(())
}

pub async fn delete_from_history<S: MediaStore, P: PlaybackStore>(
    store: &S,
    playback: &mut P,
    id: VideoId,
) -> Result<(), LibraryError> {
    match store.delete_video(id).await {
        Ok(()) => {}
        Err(DbError::NotFound { .. }) => {
            return Err(LibraryError::VideoNotFound(id));
        }
        Err(e) => return Err(e.into()),
    }

    let current = playback.snapshot();
    if current.is_playing(id) {
        playback.commit(PlaybackPointer {
            video: None,
            ..current
        });
    }
    Ok(())
}

/// Sets the user's title for a video. A blank title clears it.
pub async fn rename_video<S: MediaStore>(
    store: &S,
    id: VideoId,
    custom_title: &str,
) -> Result<(), LibraryError> {
    let custom_title = match custom_title.trim() {
        "" => None,
        title => Some(title.to_string()),
    };
    store
        .update_video(
            id,
            VideoPatch {
                custom_title: Some(custom_title),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| match e {
            DbError::NotFound { .. } => LibraryError::VideoNotFound(id),
            other => other.into(),
        })
}

pub async fn create_playlist<S: MediaStore>(
    store: &S,
    name: &str,
    description: &str,
) -> Result<Playlist, LibraryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LibraryError::EmptyName);
    }

    let now = Utc::now();
    let id = store
        .add_playlist(NewPlaylist {
            name: name.to_string(),
            description: description.trim().to_string(),
            videos: Vec::new(),
            created_at: now,
            updated_at: now,
        })
        .await?;
    store
        .get_playlist(id)
        .await?
        .ok_or(LibraryError::PlaylistNotFound(id))
}

/// Appends `video` to a playlist. Returns `false` if it was already there.
pub async fn add_to_playlist<S: MediaStore, P: PlaybackStore>(
    store: &S,
    playback: &mut P,
    playlist: PlaylistId,
    video: &Video,
) -> Result<bool, LibraryError> {
    let Some(mut record) = store.get_playlist(playlist).await? else {
        return Err(LibraryError::PlaylistNotFound(playlist));
    };
    if record.position_of(video.id).is_some() {
        return Ok(false);
    }

    let now = Utc::now();
    record.videos.push(video.clone());
    store
        .update_playlist(playlist, PlaylistPatch::videos(record.videos.clone(), now))
        .await?;
    record.updated_at = now;

    let current = playback.snapshot();
    if current.is_active(playlist) {
        playback.commit(PlaybackPointer {
            playlist: Some(record),
            ..current
        });
    }
    Ok(true)
}

pub async fn delete_playlist<S: MediaStore, P: PlaybackStore>(
    store: &S,
    playback: &mut P,
    id: PlaylistId,
) -> Result<(), LibraryError> {
    store.delete_playlist(id).await.map_err(|e| match e {
        DbError::NotFound { .. } => LibraryError::PlaylistNotFound(id),
        other => other.into(),
    })?;

    let current = playback.snapshot();
    if current.is_active(id) {
        playback.commit(PlaybackPointer {
            playlist: None,
            index: 0,
            ..current
        });
    }
    Ok(())
}

/// True on the very first call for a store, false afterwards.
pub async fn check_first_visit<S: MediaStore>(store: &S) -> Result<bool, LibraryError> {
    let first = !matches!(
        store.get_setting(FIRST_VISIT_KEY).await?,
        Some(Value::Bool(false))
    );
    if first {
        store.put_setting(FIRST_VISIT_KEY, Value::Bool(false)).await?;
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::playback::PlaybackState;

    #[tokio::test]
    async fn ingest_rejects_non_http_links() {
        let store = MemoryStore::new();
        for bad in ["", "   ", "ftp://host/a.mp4", "https://", "video.mp4"] {
            assert!(matches!(
                ingest_url(&store, bad).await,
                Err(LibraryError::InvalidUrl(_))
            ));
        }
        assert_eq!(store.video_count(), 0);
    }

    #[tokio::test]
    async fn ingest_reuses_existing_entries() {
        let store = MemoryStore::new();
        let first = ingest_url(&store, " https://example.com/clips/Intro%20Reel.webm ")
            .await
            .unwrap();
        assert_eq!(first.title, "Intro Reel");
        assert_eq!(first.url, "https://example.com/clips/Intro%20Reel.webm");

        let other = ingest_url(&store, "https://example.com/b.mp4").await.unwrap();
        let again = ingest_url(&store, "https://example.com/clips/Intro%20Reel.webm")
            .await
            .unwrap();

        assert_eq!(again.id, first.id);
        assert_eq!(store.video_count(), 2);
        let stored = store.get_video(first.id).await.unwrap().unwrap();
        assert_eq!(stored.last_watched, again.last_watched);
        assert!(stored.last_watched >= other.last_watched);
        assert_eq!(recent_history(&store, 10).await.unwrap().len(), 2);
        assert_eq!(recent_history(&store, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_the_playing_video_keeps_the_playlist() {
        let store = MemoryStore::new();
        let video = ingest_url(&store, "https://example.com/a.mp4").await.unwrap();
        let list = create_playlist(&store, "Mix", "").await.unwrap();
        let mut playback = PlaybackState::default();
        add_to_playlist(&store, &mut playback, list.id, &video).await.unwrap();

        let list = store.get_playlist(list.id).await.unwrap().unwrap();
        playback.commit(PlaybackPointer {
            video: Some(video.clone()),
            playlist: Some(list.clone()),
            index: 0,
        });

        delete_from_history(&store, &mut playback, video.id).await.unwrap();

        assert_eq!(playback.pointer().video, None);
        assert!(playback.pointer().is_active(list.id));
        assert!(matches!(
            delete_from_history(&store, &mut playback, video.id).await,
            Err(LibraryError::VideoNotFound(_))
        ));
    }

    #[tokio::test]
    async fn rename_trims_and_clears() {
        let store = MemoryStore::new();
        let video = ingest_url(&store, "https://example.com/a.mp4").await.unwrap();

        rename_video(&store, video.id, "  Keynote ").await.unwrap();
        let renamed = store.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(renamed.display_title(), "Keynote");

        rename_video(&store, video.id, "  ").await.unwrap();
        let cleared = store.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(cleared.custom_title, None);
        assert_eq!(cleared.display_title(), "a");

        assert!(matches!(
            rename_video(&store, VideoId(404), "x").await,
            Err(LibraryError::VideoNotFound(VideoId(404)))
        ));
    }

    #[tokio::test]
    async fn create_playlist_requires_a_name() {
        let store = MemoryStore::new();
        assert_eq!(
            create_playlist(&store, "  ", "d").await,
            Err(LibraryError::EmptyName)
        );

        let list = create_playlist(&store, " Road trip ", " summer ").await.unwrap();
        assert_eq!(list.name, "Road trip");
        assert_eq!(list.description, "summer");
        assert!(list.videos.is_empty());
        assert_eq!(list.created_at, list.updated_at);
    }

    #[tokio::test]
    async fn add_to_playlist_skips_members_and_refreshes_the_active_snapshot() {
        let store = MemoryStore::new();
        let a = ingest_url(&store, "https://example.com/a.mp4").await.unwrap();
        let b = ingest_url(&store, "https://example.com/b.mp4").await.unwrap();
        let list = create_playlist(&store, "Mix", "").await.unwrap();
        let mut playback = PlaybackState::new(PlaybackPointer {
            video: None,
            playlist: Some(list.clone()),
            index: 0,
        });

        assert!(add_to_playlist(&store, &mut playback, list.id, &a).await.unwrap());
        assert!(!add_to_playlist(&store, &mut playback, list.id, &a).await.unwrap());
        assert!(add_to_playlist(&store, &mut playback, list.id, &b).await.unwrap());

        let stored = store.get_playlist(list.id).await.unwrap().unwrap();
        assert_eq!(stored.videos.len(), 2);
        let active = playback.pointer().playlist.as_ref().unwrap();
        assert_eq!(active.videos, stored.videos);
        assert_eq!(playback.commits(), 2);

        assert!(matches!(
            add_to_playlist(&store, &mut playback, PlaylistId(99), &a).await,
            Err(LibraryError::PlaylistNotFound(PlaylistId(99)))
        ));
    }

    #[tokio::test]
    async fn deleting_the_active_playlist_detaches_playback() {
        let store = MemoryStore::new();
        let video = ingest_url(&store, "https://example.com/a.mp4").await.unwrap();
        let list = create_playlist(&store, "Mix", "").await.unwrap();
        let mut playback = PlaybackState::new(PlaybackPointer {
            video: Some(video.clone()),
            playlist: Some(list.clone()),
            index: 3,
        });

        delete_playlist(&store, &mut playback, list.id).await.unwrap();

        let pointer = playback.pointer();
        assert_eq!(pointer.playlist, None);
        assert_eq!(pointer.index, 0);
        assert!(pointer.is_playing(video.id));
        assert!(store.list_playlists().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_visit_is_reported_once() {
        let store = MemoryStore::new();
        assert!(check_first_visit(&store).await.unwrap());
        assert!(!check_first_visit(&store).await.unwrap());
        assert!(!check_first_visit(&store).await.unwrap());
    }

    #[tokio::test]
    async fn durations_are_recorded_once_known() {
        let store = MemoryStore::new();
        let video = ingest_url(&store, "https://example.com/a.mp4").await.unwrap();

        record_duration(&store, video.id, f64::NAN).await.unwrap();
        assert_eq!(store.get_video(video.id).await.unwrap().unwrap().duration, None);

        record_duration(&store, video.id, 93.5).await.unwrap();
        assert_eq!(
            store.get_video(video.id).await.unwrap().unwrap().duration,
            Some(93.5)
        );
    }
}
