//! Shared playback state: what is playing, which playlist drives it, and where.
//!
//! Every writer replaces the whole [`PlaybackPointer`] at once through
//! [`PlaybackStore::commit`], so observers never see a video from one state
//! paired with the index of another.

use crate::db::{Playlist, PlaylistId, Video, VideoId};
use dioxus::prelude::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackPointer {
    pub video: Option<Video>,
    /// Snapshot of the active playlist, if one is driving playback.
    pub playlist: Option<Playlist>,
    pub index: usize,
}

impl PlaybackPointer {
    pub fn is_active(&self, playlist: PlaylistId) -> bool {
        self.playlist.as_ref().map(|p| p.id) == Some(playlist)
    }

    pub fn playing_id(&self) -> Option<VideoId> {
        self.video.as_ref().map(|v| v.id)
    }

    pub fn is_playing(&self, video: VideoId) -> bool {
        self.playing_id() == Some(video)
    }

    /// Plays a single video outside of any playlist.
    pub fn solo(video: Video) -> Self {
        Self {
            video: Some(video),
            playlist: None,
            index: 0,
        }
    }

    /// Pointer for the entry after the current one in the active playlist.
    ///
    /// Returns `None` when there is no active playlist or the current entry is
    /// the last one.
    pub fn advance(&self) -> Option<Self> {
        let playlist = self.playlist.as_ref()?;
        let current = match self.playing_id() {
            Some(id) => playlist.position_of(id).unwrap_or(self.index),
            None => self.index,
        };
        let next = current + 1;
        let video = playlist.videos.get(next)?.clone();
        Some(Self {
            video: Some(video),
            playlist: Some(playlist.clone()),
            index: next,
        })
    }
}

/// Holder of the process-wide [`PlaybackPointer`].
pub trait PlaybackStore {
    fn snapshot(&self) -> PlaybackPointer;
    fn commit(&mut self, pointer: PlaybackPointer);
}

/// Plain holder, used where no reactive runtime is around.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pointer: PlaybackPointer,
    commits: usize,
}

impl PlaybackState {
    pub fn new(pointer: PlaybackPointer) -> Self {
        Self { pointer, commits: 0 }
    }

    pub fn pointer(&self) -> &PlaybackPointer {
        &self.pointer
    }

    /// Number of commits since construction.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl PlaybackStore for PlaybackState {
    fn snapshot(&self) -> PlaybackPointer {
        self.pointer.clone()
    }

    fn commit(&mut self, pointer: PlaybackPointer) {
        self.pointer = pointer;
        self.commits += 1;
    }
}

impl PlaybackStore for Signal<PlaybackPointer> {
    fn snapshot(&self) -> PlaybackPointer {
        PlaybackPointer::clone(&self.peek())
    }

    fn commit(&mut self, pointer: PlaybackPointer) {
        if *self.peek() != pointer {
            self.set(pointer);
        }
    }
}
