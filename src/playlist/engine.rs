//! Playlist reconciliation engine.
//!
//! Owns the local ordered view of one playlist. Every mutation replaces the
//! view first, then awaits the store write, and only after a successful write
//! touches the playback pointer (and only if this playlist is the active one).
//! A failed write puts the previous view back.

use super::drag::resolve_drop;
use super::reconcile::{self, Reconciliation};
use crate::db::{DbError, MediaStore, Playlist, PlaylistId, PlaylistPatch, Video, VideoId};
use crate::diagnostics::log_perf;
use crate::playback::{PlaybackPointer, PlaybackStore};
use chrono::Utc;
use dioxus::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use std::rc::Rc;
use thiserror::Error;

/// Invoked instead of touching the playback pointer when a host page runs
/// its own player.
pub type PlayCallback = Rc<dyn Fn(&Video, usize)>;

/// Where the engine keeps its ordered view.
pub trait VideoList {
    fn videos(&self) -> Vec<Video>;
    fn replace(&mut self, videos: Vec<Video>);
}

impl VideoList for Vec<Video> {
    fn videos(&self) -> Vec<Video> {
        self.clone()
    }

    fn replace(&mut self, videos: Vec<Video>) {
        *self = videos;
    }
}

impl VideoList for Signal<Vec<Video>> {
    fn videos(&self) -> Vec<Video> {
        Vec::clone(&self.peek())
    }

    fn replace(&mut self, videos: Vec<Video>) {
        self.set(videos);
    }
}

/// What a handler did, for the notification layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Nothing to do; nothing to tell the user either.
    Unchanged,
    NotEnoughVideos,
    Reordered,
    Shuffled,
    Removed { title: String },
    Cleared { playlist: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("failed to save playlist {playlist}: {source}")]
    Persist {
        playlist: PlaylistId,
        #[source]
        source: DbError,
    },

    #[error(
        "playlist {playlist} was cleared but {} video(s) could not be removed from history",
        .failed.len()
    )]
    HistoryCleanup {
        playlist: PlaylistId,
        failed: Vec<VideoId>,
    },
}

#[derive(Clone)]
pub struct PlaylistEngine<P, L = Vec<Video>> {
    /// Record fields of the playlist; its `videos` are kept in `view` instead.
    meta: Playlist,
    view: L,
    playback: P,
    on_play: Option<PlayCallback>,
}

impl<P: PlaybackStore, L: VideoList> PlaylistEngine<P, L> {
    /// Builds an engine whose view is loaded from `playlist`.
    pub fn load(playlist: &Playlist, playback: P, mut view: L) -> Self {
        view.replace(playlist.videos.clone());
        Self::attach(playlist, playback, view)
    }

    /// Builds an engine over a view that already holds the playlist's entries.
    pub fn attach(playlist: &Playlist, playback: P, view: L) -> Self {
        let mut meta = playlist.clone();
        meta.videos = Vec::new();
        Self {
            meta,
            view,
            playback,
            on_play: None,
        }
    }

    pub fn with_play_callback(mut self, on_play: Option<PlayCallback>) -> Self {
        self.on_play = on_play;
        self
    }

    pub fn id(&self) -> PlaylistId {
        self.meta.id
    }

    pub fn videos(&self) -> Vec<Video> {
        self.view.videos()
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn is_active(&self) -> bool {
        self.playback.snapshot().is_active(self.meta.id)
    }

    /// True when `video` is playing and this playlist drives playback.
    pub fn is_playing(&self, video: VideoId) -> bool {
        let pointer = self.playback.snapshot();
        pointer.is_active(self.meta.id) && pointer.is_playing(video)
    }

    pub fn total_duration(&self) -> f64 {
        self.view
            .videos()
            .iter()
            .filter_map(|v| v.duration)
            .sum()
    }

    fn snapshot(&self, videos: Vec<Video>) -> Playlist {
        Playlist {
            videos,
            ..self.meta.clone()
        }
    }

    /// Replaces the view with `next` and writes it through. On failure the
    /// view is restored to `previous`.
    async fn persist<S: MediaStore>(
        &mut self,
        store: &S,
        previous: Vec<Video>,
        next: Vec<Video>,
    ) -> Result<Playlist, EngineError> {
        self.view.replace(next.clone());

        let started_at = Utc::now();
        let result = store
            .update_playlist(self.meta.id, PlaylistPatch::videos(next.clone(), started_at))
            .await;
        log_perf(
            "playlist write",
            started_at,
            &format!("playlist={} videos={}", self.meta.id, next.len()),
        );

        match result {
            Ok(()) => {
                self.meta.updated_at = started_at;
                Ok(self.snapshot(next))
            }
            Err(source) => {
                log::error!("failed to save playlist {}: {source}", self.meta.id);
                self.view.replace(previous);
                Err(EngineError::Persist {
                    playlist: self.meta.id,
                    source,
                })
            }
        }
    }

    /// Moves the entry at `from` to `to`; entries in between shift by one.
    pub async fn reorder<S: MediaStore>(
        &mut self,
        store: &S,
        from: usize,
        to: usize,
    ) -> Result<Notice, EngineError> {
        let previous = self.view.videos();
        if from == to || from >= previous.len() || to >= previous.len() {
            return Ok(Notice::Unchanged);
        }

        let mut next = previous.clone();
        let moved = next.remove(from);
        next.insert(to, moved);

        let snapshot = self.persist(store, previous, next).await?;
        let current = self.playback.snapshot();
        if current.is_active(self.meta.id) {
            self.playback
                .commit(reconcile::after_reorder(&current, snapshot));
        }
        Ok(Notice::Reordered)
    }

    /// Reorders from drag tokens reported by the interaction layer.
    pub async fn reorder_by_token<S: MediaStore>(
        &mut self,
        store: &S,
        active: &str,
        over: &str,
    ) -> Result<Notice, EngineError> {
        match resolve_drop(&self.view.videos(), active, over) {
            Some((from, to)) => self.reorder(store, from, to).await,
            None => Ok(Notice::Unchanged),
        }
    }

    pub async fn shuffle<S: MediaStore>(&mut self, store: &S) -> Result<Notice, EngineError> {
        let mut rng = rand::thread_rng();
        self.shuffle_with(store, &mut rng).await
    }

    pub async fn shuffle_with<S: MediaStore, R: Rng + ?Sized>(
        &mut self,
        store: &S,
        rng: &mut R,
    ) -> Result<Notice, EngineError> {
        let previous = self.view.videos();
        if previous.len() < 2 {
            return Ok(Notice::NotEnoughVideos);
        }

        let mut next = previous.clone();
        next.shuffle(rng);

        let snapshot = self.persist(store, previous, next).await?;
        let current = self.playback.snapshot();
        if current.is_active(self.meta.id) {
            let Reconciliation { pointer, start_at } = reconcile::after_shuffle(&current, snapshot);
            match start_at {
                Some(position) => self.start_at(pointer, position),
                None => self.playback.commit(pointer),
            }
        }
        Ok(Notice::Shuffled)
    }

    pub async fn remove_video<S: MediaStore>(
        &mut self,
        store: &S,
        id: VideoId,
    ) -> Result<Notice, EngineError> {
        let previous = self.view.videos();
        let Some(position) = previous.iter().position(|v| v.id == id) else {
            return Ok(Notice::Unchanged);
        };
        let title = previous[position].display_title().to_string();

        let mut next = previous.clone();
        next.remove(position);

        let snapshot = self.persist(store, previous, next).await?;
        let current = self.playback.snapshot();
        if current.is_active(self.meta.id) {
            self.playback
                .commit(reconcile::after_remove(&current, snapshot, id, position));
        }
        Ok(Notice::Removed { title })
    }

    /// Empties the playlist and deletes its videos from watch history.
    pub async fn clear_all<S: MediaStore>(&mut self, store: &S) -> Result<Notice, EngineError> {
        let previous = self.view.videos();
        let snapshot = self.persist(store, previous.clone(), Vec::new()).await?;

        if self.playback.snapshot().is_active(self.meta.id) {
            self.playback.commit(reconcile::after_clear(snapshot));
        }

        let mut failed = Vec::new();
        for video in &previous {
            match store.delete_video(video.id).await {
                // Already gone from history, e.g. shared with a cleared playlist.
                Ok(()) | Err(DbError::NotFound { .. }) => {}
                Err(e) => {
                    log::warn!(
                        "failed to remove video {} from history while clearing playlist {}: {e}",
                        video.id,
                        self.meta.id
                    );
                    failed.push(video.id);
                }
            }
        }

        if failed.is_empty() {
            Ok(Notice::Cleared {
                playlist: self.meta.name.clone(),
            })
        } else {
            Err(EngineError::HistoryCleanup {
                playlist: self.meta.id,
                failed,
            })
        }
    }

    /// Plays the entry at `position`. Returns false when out of range.
    pub fn play(&mut self, position: usize) -> bool {
        let videos = self.view.videos();
        let Some(video) = videos.get(position).cloned() else {
            return false;
        };

        if let Some(on_play) = self.on_play.clone() {
            on_play(&video, position);
            return true;
        }

        let current = self.playback.snapshot();
        let playlist = if current.is_active(self.meta.id) {
            current.playlist
        } else {
            Some(self.snapshot(videos))
        };
        self.playback.commit(PlaybackPointer {
            video: Some(video),
            playlist,
            index: position,
        });
        true
    }

    /// Commits `pointer` with playback started at `position` of its playlist.
    fn start_at(&mut self, pointer: PlaybackPointer, position: usize) {
        let video = pointer
            .playlist
            .as_ref()
            .and_then(|p| p.videos.get(position))
            .cloned();
        let Some(video) = video else {
            self.playback.commit(pointer);
            return;
        };

        match self.on_play.clone() {
            Some(on_play) => {
                self.playback.commit(pointer);
                on_play(&video, position);
            }
            None => self.playback.commit(PlaybackPointer {
                video: Some(video),
                index: position,
                ..pointer
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, NewPlaylist, NewVideo, VideoPatch};
    use crate::playback::PlaybackState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    /// Memory store that counts writes and can be told to fail them.
    #[derive(Default)]
    struct TestStore {
        inner: MemoryStore,
        playlist_writes: Cell<usize>,
        deletions: RefCell<Vec<VideoId>>,
        fail_playlist_writes: Cell<bool>,
        fail_deletions: RefCell<HashSet<VideoId>>,
    }

    impl MediaStore for TestStore {
        async fn add_video(&self, video: NewVideo) -> Result<VideoId, DbError> {
            self.inner.add_video(video).await
        }
        async fn get_video(&self, id: VideoId) -> Result<Option<Video>, DbError> {
            self.inner.get_video(id).await
        }
        async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>, DbError> {
            self.inner.find_video_by_url(url).await
        }
        async fn update_video(&self, id: VideoId, patch: VideoPatch) -> Result<(), DbError> {
            self.inner.update_video(id, patch).await
        }
        async fn delete_video(&self, id: VideoId) -> Result<(), DbError> {
            self.deletions.borrow_mut().push(id);
            if self.fail_deletions.borrow().contains(&id) {
                return Err(DbError::Storage("delete rejected".into()));
            }
            self.inner.delete_video(id).await
        }
        async fn recent_videos(&self, limit: usize) -> Result<Vec<Video>, DbError> {
            self.inner.recent_videos(limit).await
        }
        async fn add_playlist(&self, playlist: NewPlaylist) -> Result<PlaylistId, DbError> {
            self.inner.add_playlist(playlist).await
        }
        async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>, DbError> {
            self.inner.get_playlist(id).await
        }
        async fn list_playlists(&self) -> Result<Vec<Playlist>, DbError> {
            self.inner.list_playlists().await
        }
        async fn update_playlist(
            &self,
            id: PlaylistId,
            patch: PlaylistPatch,
        ) -> Result<(), DbError> {
            self.playlist_writes.set(self.playlist_writes.get() + 1);
            if self.fail_playlist_writes.get() {
                return Err(DbError::Storage("quota exceeded".into()));
            }
            self.inner.update_playlist(id, patch).await
        }
        async fn delete_playlist(&self, id: PlaylistId) -> Result<(), DbError> {
            self.inner.delete_playlist(id).await
        }
        async fn get_setting(&self, key: &str) -> Result<Option<Value>, DbError> {
            self.inner.get_setting(key).await
        }
        async fn put_setting(&self, key: &str, value: Value) -> Result<(), DbError> {
            self.inner.put_setting(key, value).await
        }
    }

    struct Fixture {
        store: TestStore,
        playlist: Playlist,
    }

    /// Playlist "P" holding videos titled V1..Vn, all present in history.
    async fn fixture(count: usize) -> Fixture {
        let store = TestStore::default();
        let now = Utc::now();
        let mut videos = Vec::new();
        for n in 1..=count {
            let id = store
                .add_video(NewVideo {
                    url: format!("https://example.com/v{n}.mp4"),
                    title: format!("V{n}"),
                    custom_title: None,
                    duration: Some(10.0 * n as f64),
                    last_watched: now,
                })
                .await
                .unwrap();
            videos.push(store.get_video(id).await.unwrap().unwrap());
        }
        let id = store
            .add_playlist(NewPlaylist {
                name: "P".into(),
                description: String::new(),
                videos,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        let playlist = store.get_playlist(id).await.unwrap().unwrap();
        Fixture { store, playlist }
    }

    fn active(playlist: &Playlist, playing: Option<usize>) -> PlaybackState {
        PlaybackState::new(PlaybackPointer {
            video: playing.map(|i| playlist.videos[i].clone()),
            playlist: Some(playlist.clone()),
            index: playing.unwrap_or(0),
        })
    }

    fn ids(videos: &[Video]) -> Vec<i64> {
        videos.iter().map(|v| v.id.0).collect()
    }

    fn engine(f: &Fixture, playback: PlaybackState) -> PlaylistEngine<PlaybackState> {
        PlaylistEngine::load(&f.playlist, playback, Vec::new())
    }

    #[tokio::test]
    async fn reorder_moves_with_shift_semantics_and_persists() {
        let f = fixture(4).await;
        let mut engine = engine(&f, PlaybackState::default());

        let notice = engine.reorder(&f.store, 0, 2).await.unwrap();
        assert_eq!(notice, Notice::Reordered);
        assert_eq!(ids(&engine.videos()), vec![2, 3, 1, 4]);

        engine.reorder(&f.store, 3, 0).await.unwrap();
        assert_eq!(ids(&engine.videos()), vec![4, 2, 3, 1]);

        let stored = f.store.get_playlist(engine.id()).await.unwrap().unwrap();
        assert_eq!(ids(&stored.videos), vec![4, 2, 3, 1]);
        assert_eq!(engine.playback().commits(), 0);
    }

    #[tokio::test]
    async fn reorder_is_a_permutation_for_every_pair() {
        let f = fixture(5).await;
        for from in 0..5 {
            for to in 0..5 {
                let mut engine = engine(&f, PlaybackState::default());
                engine.reorder(&f.store, from, to).await.unwrap();
                let after = engine.videos();
                assert_eq!(after.len(), 5);
                assert_eq!(after[to].id, f.playlist.videos[from].id);
                let mut sorted = ids(&after);
                sorted.sort_unstable();
                assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
            }
        }
    }

    #[tokio::test]
    async fn reorder_out_of_range_or_unresolved_is_a_no_op() {
        let f = fixture(3).await;
        let mut engine = engine(&f, PlaybackState::default());

        assert_eq!(engine.reorder(&f.store, 0, 3).await.unwrap(), Notice::Unchanged);
        assert_eq!(engine.reorder(&f.store, 1, 1).await.unwrap(), Notice::Unchanged);
        assert_eq!(
            engine.reorder_by_token(&f.store, "1", "404").await.unwrap(),
            Notice::Unchanged
        );
        assert_eq!(f.store.playlist_writes.get(), 0);
        assert_eq!(ids(&engine.videos()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn reorder_by_token_updates_the_active_index() {
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(0)));

        engine.reorder_by_token(&f.store, "1", "3").await.unwrap();

        assert_eq!(ids(&engine.videos()), vec![2, 3, 1]);
        let pointer = engine.playback().pointer();
        assert_eq!(pointer.index, 2);
        assert_eq!(pointer.playing_id(), Some(VideoId(1)));
        assert_eq!(ids(&pointer.playlist.as_ref().unwrap().videos), vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn reorder_refreshes_an_idle_active_snapshot() {
        let f = fixture(3).await;
        let idle = PlaybackPointer {
            video: None,
            playlist: Some(f.playlist.clone()),
            index: 2,
        };
        let mut engine = engine(&f, PlaybackState::new(idle));
        assert!(engine.is_active());

        engine.reorder(&f.store, 2, 0).await.unwrap();

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.video, None);
        assert_eq!(pointer.index, 2);
        assert_eq!(ids(&pointer.playlist.as_ref().unwrap().videos), vec![3, 1, 2]);
        assert_eq!(engine.playback().commits(), 1);
    }

    #[tokio::test]
    async fn reorder_leaves_an_inactive_pointer_alone() {
        let f = fixture(3).await;
        let other = PlaybackPointer::solo(f.playlist.videos[0].clone());
        let mut engine = engine(&f, PlaybackState::new(other.clone()));

        engine.reorder(&f.store, 0, 1).await.unwrap();

        assert_eq!(engine.playback().pointer(), &other);
        assert_eq!(engine.playback().commits(), 0);
    }

    #[tokio::test]
    async fn shuffle_preserves_membership_and_tracks_the_playing_video() {
        let f = fixture(6).await;
        let mut engine = engine(&f, active(&f.playlist, Some(3)));
        let mut rng = StdRng::seed_from_u64(7);

        let notice = engine.shuffle_with(&f.store, &mut rng).await.unwrap();
        assert_eq!(notice, Notice::Shuffled);

        let after = engine.videos();
        let mut sorted = ids(&after);
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6]);

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.playing_id(), Some(VideoId(4)));
        assert_eq!(after[pointer.index].id, VideoId(4));
        assert_eq!(f.store.playlist_writes.get(), 1);
    }

    #[tokio::test]
    async fn shuffle_starts_playback_when_idle_and_active() {
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, None));

        engine.shuffle(&f.store).await.unwrap();

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.index, 0);
        assert_eq!(pointer.video.as_ref(), engine.videos().first());
        assert_eq!(engine.playback().commits(), 1);
    }

    #[tokio::test]
    async fn shuffle_hands_the_start_to_the_play_callback() {
        let f = fixture(3).await;
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = played.clone();
        let mut engine = engine(&f, active(&f.playlist, None)).with_play_callback(Some(Rc::new(
            move |video: &Video, index: usize| sink.borrow_mut().push((video.id, index)),
        )));

        engine.shuffle(&f.store).await.unwrap();

        let first = engine.videos()[0].id;
        assert_eq!(played.borrow().as_slice(), &[(first, 0)]);
    }

    #[tokio::test]
    async fn shuffle_needs_two_videos() {
        // Scenario D: single video playing, playlist not active.
        let f = fixture(1).await;
        let solo = PlaybackPointer::solo(f.playlist.videos[0].clone());
        let mut engine = engine(&f, PlaybackState::new(solo.clone()));

        let notice = engine.shuffle(&f.store).await.unwrap();

        assert_eq!(notice, Notice::NotEnoughVideos);
        assert_eq!(ids(&engine.videos()), vec![1]);
        assert_eq!(f.store.playlist_writes.get(), 0);
        assert_eq!(engine.playback().pointer(), &solo);
    }

    #[tokio::test]
    async fn removing_an_earlier_video_shifts_the_playing_index() {
        // Scenario A
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(1)));

        let notice = engine.remove_video(&f.store, VideoId(1)).await.unwrap();

        assert_eq!(notice, Notice::Removed { title: "V1".into() });
        assert_eq!(ids(&engine.videos()), vec![2, 3]);
        let pointer = engine.playback().pointer();
        assert_eq!(pointer.index, 0);
        assert_eq!(pointer.playing_id(), Some(VideoId(2)));
    }

    #[tokio::test]
    async fn removing_the_playing_last_video_plays_the_new_last() {
        // Scenario B
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(2)));

        engine.remove_video(&f.store, VideoId(3)).await.unwrap();

        assert_eq!(ids(&engine.videos()), vec![1, 2]);
        let pointer = engine.playback().pointer();
        assert_eq!(pointer.index, 1);
        assert_eq!(pointer.playing_id(), Some(VideoId(2)));
    }

    #[tokio::test]
    async fn removing_the_playing_middle_video_plays_its_successor() {
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(1)));

        engine.remove_video(&f.store, VideoId(2)).await.unwrap();

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.index, 1);
        assert_eq!(pointer.playing_id(), Some(VideoId(3)));
    }

    #[tokio::test]
    async fn removing_a_non_member_changes_nothing() {
        let f = fixture(2).await;
        let mut engine = engine(&f, active(&f.playlist, Some(0)));
        let before = engine.playback().clone();

        let notice = engine.remove_video(&f.store, VideoId(99)).await.unwrap();

        assert_eq!(notice, Notice::Unchanged);
        assert_eq!(ids(&engine.videos()), vec![1, 2]);
        assert_eq!(f.store.playlist_writes.get(), 0);
        assert_eq!(engine.playback(), &before);
    }

    #[tokio::test]
    async fn remove_shrinks_by_exactly_one() {
        let f = fixture(4).await;
        for victim in 1..=4 {
            let mut engine = engine(&f, PlaybackState::default());
            engine.remove_video(&f.store, VideoId(victim)).await.unwrap();
            let after = engine.videos();
            assert_eq!(after.len(), 3);
            assert!(after.iter().all(|v| v.id != VideoId(victim)));
        }
    }

    #[tokio::test]
    async fn clear_all_stops_playback_and_purges_history() {
        // Scenario C
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, None));

        let notice = engine.clear_all(&f.store).await.unwrap();

        assert_eq!(notice, Notice::Cleared { playlist: "P".into() });
        assert!(engine.videos().is_empty());
        let pointer = engine.playback().pointer();
        assert_eq!(pointer.video, None);
        assert_eq!(pointer.index, 0);
        assert!(pointer.playlist.as_ref().unwrap().videos.is_empty());
        assert_eq!(
            f.store.deletions.borrow().as_slice(),
            &[VideoId(1), VideoId(2), VideoId(3)]
        );
        assert_eq!(f.store.inner.video_count(), 0);
    }

    #[tokio::test]
    async fn clear_all_stops_the_playing_video() {
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(1)));

        engine.clear_all(&f.store).await.unwrap();

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.video, None);
        assert_eq!(pointer.index, 0);
        assert!(pointer.is_active(engine.id()));
        assert!(pointer.playlist.as_ref().unwrap().videos.is_empty());
    }

    #[tokio::test]
    async fn clearing_playlists_that_share_videos_succeeds_twice() {
        let f = fixture(2).await;
        let now = Utc::now();
        let second_id = f
            .store
            .add_playlist(NewPlaylist {
                name: "Q".into(),
                description: String::new(),
                videos: f.playlist.videos.clone(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        let second = f.store.get_playlist(second_id).await.unwrap().unwrap();

        let mut first = engine(&f, PlaybackState::default());
        assert_eq!(
            first.clear_all(&f.store).await.unwrap(),
            Notice::Cleared { playlist: "P".into() }
        );

        let mut other = PlaylistEngine::load(&second, PlaybackState::default(), Vec::new());
        assert_eq!(
            other.clear_all(&f.store).await.unwrap(),
            Notice::Cleared { playlist: "Q".into() }
        );
        assert!(other.videos().is_empty());
        assert_eq!(f.store.deletions.borrow().len(), 4);
        assert_eq!(f.store.inner.video_count(), 0);
    }

    #[tokio::test]
    async fn clearing_an_empty_playlist_deletes_nothing() {
        let f = fixture(0).await;
        let mut engine = engine(&f, PlaybackState::default());

        engine.clear_all(&f.store).await.unwrap();
        engine.clear_all(&f.store).await.unwrap();

        assert!(engine.videos().is_empty());
        assert!(f.store.deletions.borrow().is_empty());
    }

    #[tokio::test]
    async fn clear_all_reports_history_cleanup_failures() {
        let f = fixture(3).await;
        f.store.fail_deletions.borrow_mut().insert(VideoId(2));
        let mut engine = engine(&f, PlaybackState::default());

        let err = engine.clear_all(&f.store).await.unwrap_err();

        assert_eq!(
            err,
            EngineError::HistoryCleanup {
                playlist: engine.id(),
                failed: vec![VideoId(2)],
            }
        );
        assert!(engine.videos().is_empty());
        assert_eq!(f.store.deletions.borrow().len(), 3);
        assert_eq!(f.store.inner.video_count(), 1);
    }

    #[tokio::test]
    async fn failed_writes_roll_back_the_view_and_skip_reconciliation() {
        let f = fixture(3).await;
        f.store.fail_playlist_writes.set(true);
        let mut engine = engine(&f, active(&f.playlist, Some(2)));
        let before = engine.playback().clone();

        let err = engine.remove_video(&f.store, VideoId(3)).await.unwrap_err();
        assert!(matches!(err, EngineError::Persist { .. }));
        assert!(engine.reorder(&f.store, 0, 2).await.is_err());
        assert!(engine.clear_all(&f.store).await.is_err());

        assert_eq!(ids(&engine.videos()), vec![1, 2, 3]);
        assert_eq!(engine.playback(), &before);
        assert!(f.store.deletions.borrow().is_empty());
    }

    #[tokio::test]
    async fn pointer_invariant_holds_after_every_mutation() {
        let f = fixture(5).await;
        let mut engine = engine(&f, active(&f.playlist, Some(2)));
        let mut rng = StdRng::seed_from_u64(99);

        engine.reorder(&f.store, 4, 0).await.unwrap();
        engine.shuffle_with(&f.store, &mut rng).await.unwrap();
        engine.remove_video(&f.store, VideoId(1)).await.unwrap();
        engine.reorder(&f.store, 0, 3).await.unwrap();

        let pointer = engine.playback().pointer();
        let videos = engine.videos();
        assert_eq!(pointer.playing_id(), Some(VideoId(3)));
        assert_eq!(videos[pointer.index].id, VideoId(3));
        assert_eq!(pointer.playlist.as_ref().unwrap().videos, videos);
    }

    #[test]
    fn play_activates_the_playlist_at_the_position() {
        let now = Utc::now();
        let playlist = Playlist {
            id: PlaylistId(3),
            name: "Q".into(),
            description: String::new(),
            videos: (1..=3)
                .map(|n| Video {
                    id: VideoId(n),
                    url: format!("https://example.com/{n}"),
                    title: format!("V{n}"),
                    custom_title: None,
                    duration: None,
                    last_watched: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        let mut engine = PlaylistEngine::load(&playlist, PlaybackState::default(), Vec::new());

        assert!(!engine.play(3));
        assert_eq!(engine.playback().commits(), 0);

        assert!(engine.play(1));
        let pointer = engine.playback().pointer();
        assert!(pointer.is_active(PlaylistId(3)));
        assert_eq!(pointer.index, 1);
        assert_eq!(pointer.playing_id(), Some(VideoId(2)));
        assert!(engine.is_playing(VideoId(2)));
        assert_eq!(engine.total_duration(), 0.0);
    }

    #[tokio::test]
    async fn play_keeps_the_existing_snapshot_when_already_active() {
        let f = fixture(3).await;
        let mut engine = engine(&f, active(&f.playlist, Some(0)));
        engine.play(2);

        let pointer = engine.playback().pointer();
        assert_eq!(pointer.playlist.as_ref(), Some(&f.playlist));
        assert_eq!(pointer.index, 2);
        assert_eq!(engine.total_duration(), 60.0);
    }
}
