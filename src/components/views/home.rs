use crate::components::{
    use_strings, AddToPlaylistDialog, Icon, LibraryVersion, Player, PlaylistSidebar, StoreHandle,
    Toaster,
};
use crate::db::{AppSettings, Video, VideoId};
use crate::i18n::{fill, Strings};
use crate::library::{delete_from_history, ingest_url, recent_history, rename_video};
use crate::playback::{PlaybackPointer, PlaybackStore};
use crate::utils::format_duration;
use chrono::{DateTime, Local, Utc};
use dioxus::prelude::*;

fn watched_label(at: DateTime<Utc>, t: &Strings) -> String {
    let local = at.with_timezone(&Local);
    if local.date_naive() == Local::now().date_naive() {
        fill(t.today_at, &[("time", &local.format("%H:%M").to_string())])
    } else {
        local.format(t.date_format).to_string()
    }
}

#[component]
pub fn HomeView() -> Element {
    let store = use_context::<StoreHandle>();
    let mut playback = use_context::<Signal<PlaybackPointer>>();
    let settings = use_context::<Signal<AppSettings>>();
    let toaster = use_context::<Toaster>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();
    let mut url_input = use_signal(String::new);
    let mut add_target = use_signal(|| None::<Video>);

    let history = {
        let store = store.clone();
        use_resource(move || {
            let store = store.clone();
            let limit = settings().recent_limit;
            let _version = library_version.get();
            async move { recent_history(&*store, limit).await }
        })
    };

    // Opening a video bumps it to the top of the history
    let open_url = {
        let store = store.clone();
        move |url: String| {
            let store = store.clone();
            spawn(async move {
                match ingest_url(&*store, &url).await {
                    Ok(video) => {
                        playback.commit(PlaybackPointer::solo(video));
                        library_version.bump();
                    }
                    Err(e) => toaster.error(toaster.strings().library_error(&e)),
                }
            });
        }
    };

    let on_submit = {
        let open_url = open_url.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let url = url_input.peek().trim().to_string();
            if url.is_empty() {
                return;
            }
            url_input.set(String::new());
            open_url(url);
        }
    };

    let pointer = playback();
    let active_playlist = pointer.playlist.as_ref().map(|p| p.id);

    rsx! {
        div { class: "space-y-8",
            header {
                h1 { class: "text-3xl font-bold text-white mb-2", "{t.home_title}" }
                p { class: "text-zinc-400", "{t.home_subtitle}" }
            }

            div { class: "grid gap-6 xl:grid-cols-[1fr_22rem]",
                div { class: "space-y-6 min-w-0",
                    if pointer.video.is_some() {
                        Player {}
                    } else {
                        form {
                            class: "flex flex-col sm:flex-row gap-3 p-6 rounded-2xl bg-zinc-900/60 border border-zinc-800/60",
                            onsubmit: on_submit,
                            div { class: "flex-1 flex items-center gap-3 px-3 rounded-xl bg-zinc-950 border border-zinc-800 focus-within:border-emerald-500",
                                Icon { name: "link".to_string(), class: "w-4 h-4 text-zinc-500".to_string() }
                                input {
                                    class: "flex-1 py-2.5 bg-transparent text-white text-sm focus:outline-none",
                                    r#type: "url",
                                    placeholder: t.url_placeholder,
                                    dir: "ltr",
                                    value: "{url_input}",
                                    oninput: move |e| url_input.set(e.value()),
                                }
                            }
                            button {
                                r#type: "submit",
                                class: "px-5 py-2.5 rounded-xl bg-emerald-500 hover:bg-emerald-400 text-white text-sm font-medium transition-colors",
                                "{t.play}"
                            }
                        }
                    }

                    section {
                        h2 { class: "text-lg font-semibold text-white mb-3", "{t.recently_watched}" }
                        {match history() {
                            Some(Ok(videos)) if !videos.is_empty() => rsx! {
                                div { class: "space-y-1",
                                    for video in videos {
                                        HistoryRow {
                                            key: "{video.id}",
                                            video: video.clone(),
                                            is_current: pointer.is_playing(video.id),
                                            on_open: {
                                                let open_url = open_url.clone();
                                                move |url: String| open_url(url)
                                            },
                                            on_add: move |video: Video| add_target.set(Some(video)),
                                        }
                                    }
                                }
                            },
                            Some(Ok(_)) => rsx! {
                                div { class: "flex flex-col items-center justify-center py-12 text-center",
                                    Icon { name: "clock".to_string(), class: "w-12 h-12 text-zinc-700 mb-3".to_string() }
                                    p { class: "text-zinc-400", "{t.nothing_watched}" }
                                }
                            },
                            Some(Err(e)) => rsx! {
                                p { class: "text-sm text-red-400", {fill(t.loading_failed, &[("error", &t.library_error(&e))])} }
                            },
                            None => rsx! {
                                div { class: "flex justify-center py-12",
                                    Icon { name: "loader".to_string(), class: "w-8 h-8 text-zinc-500".to_string() }
                                }
                            },
                        }}
                    }
                }

                if let Some(playlist_id) = active_playlist {
                    PlaylistSidebar { key: "{playlist_id}", playlist_id }
                }
            }
        }

        if let Some(video) = add_target() {
            AddToPlaylistDialog { video, on_close: move |_| add_target.set(None) }
        }
    }
}

#[component]
fn HistoryRow(
    video: Video,
    is_current: bool,
    on_open: EventHandler<String>,
    on_add: EventHandler<Video>,
) -> Element {
    let store = use_context::<StoreHandle>();
    let mut playback = use_context::<Signal<PlaybackPointer>>();
    let toaster = use_context::<Toaster>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let video_id: VideoId = video.id;
    let title = video.display_title().to_string();

    let on_rename = {
        let store = store.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let store = store.clone();
            let value = draft.peek().clone();
            editing.set(false);
            spawn(async move {
                match rename_video(&*store, video_id, &value).await {
                    Ok(()) => library_version.bump(),
                    Err(e) => toaster.error(t.library_error(&e)),
                }
            });
        }
    };

    let on_delete = {
        let store = store.clone();
        let title = title.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            let store = store.clone();
            let title = title.clone();
            spawn(async move {
                match delete_from_history(&*store, &mut playback, video_id).await {
                    Ok(()) => {
                        toaster.success(fill(t.removed_from_history, &[("title", &title)]));
                        library_version.bump();
                    }
                    Err(e) => toaster.error(t.library_error(&e)),
                }
            });
        }
    };

    let play_icon = if is_current { "video" } else { "play" };
    let row_class = if is_current {
        "flex items-center gap-4 p-3 rounded-xl bg-emerald-500/5 group"
    } else {
        "flex items-center gap-4 p-3 rounded-xl hover:bg-zinc-800/50 transition-colors group"
    };

    rsx! {
        div { class: "{row_class}",
            button {
                class: "w-10 h-10 rounded-lg bg-zinc-800 flex items-center justify-center text-zinc-400 group-hover:text-emerald-400 transition-colors shrink-0",
                aria_label: t.play,
                onclick: {
                    let url = video.url.clone();
                    move |_| on_open.call(url.clone())
                },
                Icon { name: play_icon.to_string(), class: "w-4 h-4".to_string() }
            }
            div { class: "flex-1 min-w-0",
                if editing() {
                    form { onsubmit: on_rename,
                        input {
                            class: "w-full px-2 py-1 rounded-md bg-zinc-950 border border-zinc-700 text-sm text-white focus:outline-none focus:border-emerald-500",
                            autofocus: true,
                            value: "{draft}",
                            oninput: move |e| draft.set(e.value()),
                            onkeydown: move |e: KeyboardEvent| {
                                if e.key() == Key::Escape {
                                    editing.set(false);
                                }
                            },
                        }
                    }
                } else {
                    p { class: if is_current { "text-sm font-medium text-emerald-300 truncate" } else { "text-sm font-medium text-white truncate" },
                        "{title}"
                    }
                }
                p { class: "text-xs text-zinc-500 truncate",
                    "{watched_label(video.last_watched, t)}"
                    if let Some(duration) = video.duration {
                        " • {format_duration(duration)}"
                    }
                }
            }
            div { class: "flex items-center gap-1 opacity-0 group-hover:opacity-100 transition-opacity",
                button {
                    class: "p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800",
                    aria_label: t.rename,
                    onclick: {
                        let title = title.clone();
                        move |_| {
                            draft.set(title.clone());
                            editing.set(true);
                        }
                    },
                    Icon { name: "edit".to_string(), class: "w-4 h-4".to_string() }
                }
                button {
                    class: "p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800",
                    aria_label: t.add_to_playlist,
                    onclick: {
                        let video = video.clone();
                        move |_| on_add.call(video.clone())
                    },
                    Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
                }
                button {
                    class: "p-2 rounded-lg text-zinc-400 hover:text-red-300 hover:bg-red-500/10",
                    aria_label: t.delete_from_history,
                    onclick: on_delete,
                    Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                }
            }
        }
    }
}
