use crate::components::{
    use_strings, Icon, LibraryVersion, Player, PlaylistSidebar, StoreHandle, Toaster,
};
use crate::db::{MediaStore, PlaylistId, Video};
use crate::i18n::fill;
use crate::library::ingest_url;
use crate::playback::{PlaybackPointer, PlaybackStore};
use crate::utils::format_duration;
use dioxus::prelude::*;

#[component]
pub fn PlaylistDetailView(playlist_id: PlaylistId) -> Element {
    let store = use_context::<StoreHandle>();
    let playback = use_context::<Signal<PlaybackPointer>>();
    let toaster = use_context::<Toaster>();
    let library_version = use_context::<LibraryVersion>();
    let t = use_strings();

    let playlist_data = {
        let store = store.clone();
        use_resource(move || {
            let store = store.clone();
            let _version = library_version.get();
            async move { store.get_playlist(playlist_id).await }
        })
    };

    // Playing from this page also records the watch in history
    let play_at = {
        let store = store.clone();
        move |(video, index): (Video, usize)| {
            let mut playback = playback;
            let current = playback.snapshot();
            let playlist = if current.is_active(playlist_id) {
                current.playlist
            } else {
                match playlist_data() {
                    Some(Ok(Some(playlist))) => Some(playlist),
                    _ => return,
                }
            };
            playback.commit(PlaybackPointer {
                video: Some(video.clone()),
                playlist,
                index,
            });

            let store = store.clone();
            let mut library_version = library_version;
            spawn(async move {
                match ingest_url(&*store, &video.url).await {
                    Ok(_) => library_version.bump(),
                    Err(e) => log::warn!("failed to record watch of video {}: {e}", video.id),
                }
            });
        }
    };

    let pointer = playback();

    rsx! {
        {match playlist_data() {
            Some(Ok(Some(playlist))) => {
                let count_label = t.videos(playlist.videos.len());
                let total: f64 = playlist.videos.iter().filter_map(|v| v.duration).sum();
                let first = playlist.videos.first().cloned();
                let showing_player = pointer.is_active(playlist_id) && pointer.video.is_some();
                rsx! {
                    div { class: "space-y-6",
                        header { class: "flex flex-col sm:flex-row sm:items-end gap-4 justify-between",
                            div { class: "min-w-0",
                                p { class: "text-xs uppercase tracking-widest text-zinc-500", "{t.nav_playlist}" }
                                h1 { class: "text-3xl font-bold text-white truncate", "{playlist.name}" }
                                if !playlist.description.is_empty() {
                                    p { class: "text-zinc-400 mt-1", "{playlist.description}" }
                                }
                                p { class: "text-sm text-zinc-500 mt-2", "{count_label} • {format_duration(total)}" }
                            }
                            button {
                                class: "flex items-center gap-2 px-5 py-2.5 rounded-full bg-emerald-500 hover:bg-emerald-400 disabled:opacity-40 disabled:cursor-not-allowed text-white text-sm font-medium transition-colors",
                                disabled: first.is_none(),
                                onclick: {
                                    let play_at = play_at.clone();
                                    move |_| {
                                        if let Some(video) = first.clone() {
                                            play_at((video, 0));
                                        } else {
                                            toaster.warning(t.playlist_empty);
                                        }
                                    }
                                },
                                Icon { name: "play".to_string(), class: "w-4 h-4".to_string() }
                                "{t.play_all}"
                            }
                        }

                        div { class: "grid gap-6 xl:grid-cols-[1fr_24rem]",
                            div { class: "min-w-0",
                                if showing_player {
                                    Player {}
                                } else {
                                    div { class: "aspect-video rounded-2xl bg-zinc-900/60 border border-zinc-800/60 flex flex-col items-center justify-center text-center p-6",
                                        Icon { name: "video".to_string(), class: "w-12 h-12 text-zinc-700 mb-3".to_string() }
                                        p { class: "text-zinc-400", "{t.pick_video}" }
                                    }
                                }
                            }
                            PlaylistSidebar {
                                playlist_id,
                                on_play: {
                                    let play_at = play_at.clone();
                                    move |entry: (Video, usize)| play_at(entry)
                                },
                            }
                        }
                    }
                }
            }
            Some(Ok(None)) => rsx! {
                div { class: "flex flex-col items-center justify-center py-20",
                    Icon { name: "playlist".to_string(), class: "w-16 h-16 text-zinc-600 mb-4".to_string() }
                    h2 { class: "text-xl font-semibold text-white mb-2", "{t.playlist_not_found}" }
                    p { class: "text-zinc-400", "{t.playlist_maybe_deleted}" }
                }
            },
            Some(Err(e)) => rsx! {
                p { class: "text-sm text-red-400", {fill(t.loading_failed, &[("error", &e.to_string())])} }
            },
            None => rsx! {
                div { class: "flex items-center justify-center py-20",
                    Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500".to_string() }
                }
            },
        }}
    }
}
