//! Ordered list of one playlist's videos with reorder, shuffle, remove and
//! clear controls. All mutations go through [`PlaylistEngine`].

use crate::components::{use_strings, Icon, LibraryVersion, StoreHandle, Toaster};
use crate::db::{MediaStore, Playlist, PlaylistId, Video};
use crate::i18n::fill;
use crate::playback::PlaybackPointer;
use crate::playlist::{DragToken, EngineError, Notice, PlayCallback, PlaylistEngine};
use crate::utils::format_duration;
use dioxus::prelude::*;
use std::rc::Rc;

type SidebarEngine = PlaylistEngine<Signal<PlaybackPointer>, Signal<Vec<Video>>>;

#[derive(Clone, Copy)]
struct SidebarContext {
    meta: Signal<Option<Playlist>>,
    view: Signal<Vec<Video>>,
    playback: Signal<PlaybackPointer>,
    on_play: Option<EventHandler<(Video, usize)>>,
    toaster: Toaster,
    library_version: LibraryVersion,
}

impl SidebarContext {
    fn engine(&self) -> Option<SidebarEngine> {
        let meta = self.meta.peek().clone()?;
        let on_play = self.on_play.map(|handler| -> PlayCallback {
            Rc::new(move |video: &Video, index: usize| handler.call((video.clone(), index)))
        });
        Some(PlaylistEngine::attach(&meta, self.playback, self.view).with_play_callback(on_play))
    }

    fn report(&self, result: Result<Notice, EngineError>) {
        let mut library_version = self.library_version;
        match result {
            Ok(notice) => {
                let changed = !matches!(notice, Notice::Unchanged | Notice::NotEnoughVideos);
                self.toaster.notice(&notice);
                if changed {
                    library_version.bump();
                }
            }
            Err(e @ EngineError::HistoryCleanup { .. }) => {
                self.toaster.warning(self.toaster.strings().engine_error(&e));
                library_version.bump();
            }
            Err(e) => self.toaster.error(self.toaster.strings().engine_error(&e)),
        }
    }
}

#[component]
pub fn PlaylistSidebar(
    playlist_id: PlaylistId,
    on_play: Option<EventHandler<(Video, usize)>>,
) -> Element {
    let store = use_context::<StoreHandle>();
    let playback = use_context::<Signal<PlaybackPointer>>();
    let toaster = use_context::<Toaster>();
    let library_version = use_context::<LibraryVersion>();
    let t = use_strings();
    let mut meta = use_signal(|| None::<Playlist>);
    let mut view = use_signal(Vec::<Video>::new);
    let mut dragging = use_signal(|| None::<DragToken>);
    let mut confirm_clear = use_signal(|| false);

    let record = {
        let store = store.clone();
        use_resource(move || {
            let store = store.clone();
            let _version = library_version.get();
            async move { store.get_playlist(playlist_id).await }
        })
    };

    use_effect(move || {
        if let Some(Ok(Some(playlist))) = record() {
            view.set(playlist.videos.clone());
            meta.set(Some(playlist));
        }
    });

    let ctx = SidebarContext {
        meta,
        view,
        playback,
        on_play,
        toaster,
        library_version,
    };

    let on_shuffle = {
        let store = store.clone();
        move |_| {
            let Some(mut engine) = ctx.engine() else {
                return;
            };
            let store = store.clone();
            spawn(async move {
                let result = engine.shuffle(&*store).await;
                ctx.report(result);
            });
        }
    };

    let on_clear = {
        let store = store.clone();
        move |_| {
            confirm_clear.set(false);
            let Some(mut engine) = ctx.engine() else {
                return;
            };
            let store = store.clone();
            spawn(async move {
                let result = engine.clear_all(&*store).await;
                ctx.report(result);
            });
        }
    };

    let videos = view();
    // Subscribes to pointer changes; the engine reads it without tracking
    let _pointer = playback();
    let (Some(playlist), Some(engine)) = (meta(), ctx.engine()) else {
        return match record() {
            Some(Ok(None)) => rsx! {
                p { class: "text-sm text-zinc-500 p-4", "{t.playlist_gone}" }
            },
            Some(Err(e)) => rsx! {
                p { class: "text-sm text-red-400 p-4", {fill(t.loading_failed, &[("error", &e.to_string())])} }
            },
            _ => rsx! {
                div { class: "flex justify-center py-8",
                    Icon { name: "loader".to_string(), class: "w-6 h-6 text-zinc-500".to_string() }
                }
            },
        };
    };

    let is_active = engine.is_active();
    let total = engine.total_duration();
    let count = videos.len();
    let count_label = t.videos(count);
    let clear_warning = fill(
        t.clear_all_warning,
        &[("count", &count.to_string()), ("name", &playlist.name)],
    );

    rsx! {
        aside { class: "rounded-2xl bg-zinc-900/60 border border-zinc-800/60 flex flex-col min-h-0",
            div { class: "px-4 py-3 border-b border-zinc-800/60 space-y-3",
                div { class: "flex items-start justify-between gap-3",
                    div { class: "min-w-0",
                        p { class: "text-xs uppercase tracking-wider text-zinc-500",
                            if is_active { "{t.now_playing}" } else { "{t.nav_playlist}" }
                        }
                        h2 { class: "text-base font-semibold text-white truncate", "{playlist.name}" }
                        p { class: "text-xs text-zinc-500", "{count_label} • {format_duration(total)}" }
                    }
                }
                div { class: "flex gap-2",
                    button {
                        class: "flex-1 flex items-center justify-center gap-2 px-3 py-1.5 rounded-full border border-zinc-700 text-zinc-300 hover:text-white hover:border-emerald-500/60 disabled:opacity-40 disabled:cursor-not-allowed text-xs transition-colors",
                        disabled: count < 2,
                        title: t.shuffle,
                        onclick: on_shuffle,
                        Icon { name: "shuffle".to_string(), class: "w-3.5 h-3.5".to_string() }
                        "{t.shuffle}"
                    }
                    button {
                        class: "flex-1 flex items-center justify-center gap-2 px-3 py-1.5 rounded-full border border-red-500/40 text-red-300 hover:text-white hover:bg-red-500/10 disabled:opacity-40 disabled:cursor-not-allowed text-xs transition-colors",
                        disabled: count == 0,
                        title: t.clear_all,
                        onclick: move |_| confirm_clear.set(true),
                        Icon { name: "trash".to_string(), class: "w-3.5 h-3.5".to_string() }
                        "{t.clear_all}"
                    }
                }
                if confirm_clear() {
                    div { class: "rounded-xl border border-red-500/40 bg-red-500/5 p-3 space-y-2",
                        p { class: "text-xs text-red-200", "{clear_warning}" }
                        div { class: "flex justify-end gap-2",
                            button {
                                class: "px-3 py-1 rounded-full text-xs text-zinc-300 hover:text-white",
                                onclick: move |_| confirm_clear.set(false),
                                "{t.cancel}"
                            }
                            button {
                                class: "px-3 py-1 rounded-full text-xs bg-red-500 hover:bg-red-400 text-white",
                                onclick: on_clear,
                                "{t.clear}"
                            }
                        }
                    }
                }
            }

            if videos.is_empty() {
                div { class: "flex flex-col items-center justify-center py-10 text-center",
                    Icon { name: "playlist".to_string(), class: "w-10 h-10 text-zinc-700 mb-2".to_string() }
                    p { class: "text-sm text-zinc-500", "{t.no_videos_in_playlist}" }
                }
            } else {
                ol { class: "flex-1 overflow-y-auto p-2 space-y-1",
                    for (index , video) in videos.iter().enumerate() {
                        PlaylistRow {
                            key: "{video.id}",
                            video: video.clone(),
                            index,
                            is_current: engine.is_playing(video.id),
                            is_dragging: dragging().as_ref() == Some(&DragToken::from(video.id)),
                            on_play: {
                                move |_| {
                                    if let Some(mut engine) = ctx.engine() {
                                        engine.play(index);
                                    }
                                }
                            },
                            on_remove: {
                                let store = store.clone();
                                let video_id = video.id;
                                move |_| {
                                    let Some(mut engine) = ctx.engine() else {
                                        return;
                                    };
                                    let store = store.clone();
                                    spawn(async move {
                                        let result = engine.remove_video(&*store, video_id).await;
                                        ctx.report(result);
                                    });
                                }
                            },
                            on_drag_start: {
                                let token = DragToken::from(video.id);
                                move |_| dragging.set(Some(token.clone()))
                            },
                            on_drag_end: move |_| dragging.set(None),
                            on_drop: {
                                let store = store.clone();
                                let over = DragToken::from(video.id);
                                move |_| {
                                    let Some(active) = dragging.peek().clone() else {
                                        return;
                                    };
                                    dragging.set(None);
                                    let Some(mut engine) = ctx.engine() else {
                                        return;
                                    };
                                    let store = store.clone();
                                    let over = over.clone();
                                    spawn(async move {
                                        let result = engine
                                            .reorder_by_token(&*store, active.as_str(), over.as_str())
                                            .await;
                                        ctx.report(result);
                                    });
                                }
                            },
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PlaylistRow(
    video: Video,
    index: usize,
    is_current: bool,
    is_dragging: bool,
    on_play: EventHandler<()>,
    on_remove: EventHandler<()>,
    on_drag_start: EventHandler<()>,
    on_drag_end: EventHandler<()>,
    on_drop: EventHandler<()>,
) -> Element {
    let row_class = if is_dragging {
        "flex items-center gap-3 p-2 rounded-lg bg-emerald-500/10 border border-emerald-500/40 opacity-80 select-none"
    } else if is_current {
        "flex items-center gap-3 p-2 rounded-lg bg-emerald-500/5 border border-transparent select-none group cursor-pointer"
    } else {
        "flex items-center gap-3 p-2 rounded-lg hover:bg-zinc-800/50 border border-transparent select-none group cursor-pointer"
    };
    let position = index + 1;
    let t = use_strings();

    rsx! {
        li {
            class: "{row_class}",
            draggable: true,
            ondragstart: move |_| on_drag_start.call(()),
            ondragend: move |_| on_drag_end.call(()),
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                on_drop.call(());
            },
            onclick: move |_| on_play.call(()),
            span {
                class: "text-zinc-600 cursor-grab active:cursor-grabbing",
                title: t.drag_to_reorder,
                Icon { name: "grip".to_string(), class: "w-4 h-4".to_string() }
            }
            if is_current {
                span { class: "w-6 text-emerald-400",
                    Icon { name: "play".to_string(), class: "w-3.5 h-3.5".to_string() }
                }
            } else {
                span { class: "w-6 text-xs text-zinc-500 tabular-nums", "{position}" }
            }
            div { class: "flex-1 min-w-0",
                p {
                    class: if is_current { "text-sm text-emerald-300 truncate" } else { "text-sm text-white truncate" },
                    "{video.display_title()}"
                }
                if let Some(duration) = video.duration {
                    p { class: "text-xs text-zinc-500", "{format_duration(duration)}" }
                }
            }
            button {
                class: "p-1.5 rounded-lg text-zinc-500 hover:text-red-300 hover:bg-red-500/10 opacity-0 group-hover:opacity-100 transition-all",
                aria_label: t.remove_from_playlist,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    on_remove.call(());
                },
                Icon { name: "x".to_string(), class: "w-3.5 h-3.5".to_string() }
            }
        }
    }
}
