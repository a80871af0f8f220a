//! Playback pointer rules applied after a playlist mutation.
//!
//! Each function takes the pointer as it was before the mutation and the new
//! snapshot of the (active) playlist, and returns the pointer to commit.

use crate::db::{Playlist, VideoId};
use crate::playback::PlaybackPointer;

/// Pointer to commit, plus a position to start playing from afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub pointer: PlaybackPointer,
    pub start_at: Option<usize>,
}

pub fn after_reorder(current: &PlaybackPointer, snapshot: Playlist) -> PlaybackPointer {
    let index = current
        .playing_id()
        .and_then(|id| snapshot.position_of(id))
        .unwrap_or(current.index);
    PlaybackPointer {
        video: current.video.clone(),
        playlist: Some(snapshot),
        index,
    }
}

pub fn after_shuffle(current: &PlaybackPointer, snapshot: Playlist) -> Reconciliation {
    let found = current.playing_id().and_then(|id| snapshot.position_of(id));
    let start_at = match found {
        Some(_) => None,
        None if snapshot.videos.is_empty() => None,
        None => Some(0),
    };
    Reconciliation {
        pointer: PlaybackPointer {
            video: current.video.clone(),
            index: found.unwrap_or(current.index),
            playlist: Some(snapshot),
        },
        start_at,
    }
}

pub fn after_remove(
    current: &PlaybackPointer,
    snapshot: Playlist,
    removed: VideoId,
    removed_from: usize,
) -> PlaybackPointer {
    if current.is_playing(removed) {
        let (video, index) = match snapshot.videos.len() {
            0 => (None, 0),
            len => {
                let index = removed_from.min(len - 1);
                (Some(snapshot.videos[index].clone()), index)
            }
        };
        return PlaybackPointer {
            video,
            playlist: Some(snapshot),
            index,
        };
    }

    let index = match current.playing_id() {
        Some(id) => snapshot.position_of(id).unwrap_or(current.index),
        None if !snapshot.videos.is_empty() => 0,
        None => current.index,
    };
    PlaybackPointer {
        video: current.video.clone(),
        playlist: Some(snapshot),
        index,
    }
}

pub fn after_clear(snapshot: Playlist) -> PlaybackPointer {
    PlaybackPointer {
        video: None,
        playlist: Some(snapshot),
        index: 0,
    }
}
