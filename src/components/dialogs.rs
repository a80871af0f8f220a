use crate::components::{use_strings, Icon, LibraryVersion, StoreHandle, Toaster};
use crate::db::{MediaStore, Playlist, Video};
use crate::i18n::fill;
use crate::library::{add_to_playlist, create_playlist};
use crate::playback::PlaybackPointer;
use dioxus::prelude::*;

#[component]
fn DialogFrame(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    let t = use_strings();

    rsx! {
        div {
            class: "fixed inset-0 z-50 flex items-center justify-center bg-black/70 backdrop-blur-sm p-4",
            onclick: move |_| on_close.call(()),
            div {
                class: "w-full max-w-md rounded-2xl bg-zinc-900 border border-zinc-800 shadow-2xl",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                div { class: "flex items-center justify-between px-5 py-4 border-b border-zinc-800",
                    h2 { class: "text-lg font-semibold text-white", "{title}" }
                    button {
                        class: "p-1.5 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800 transition-colors",
                        aria_label: t.close,
                        onclick: move |_| on_close.call(()),
                        Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                    }
                }
                div { class: "p-5 space-y-4", {children} }
            }
        }
    }
}

#[component]
pub fn WelcomeDialog(on_close: EventHandler<()>) -> Element {
    let t = use_strings();

    rsx! {
        DialogFrame { title: "{t.welcome_title}", on_close,
            p { class: "text-sm text-zinc-300", "{t.welcome_intro}" }
            ul { class: "text-sm text-zinc-400 space-y-2 list-disc ps-5",
                li { "{t.welcome_tip_playlists}" }
                li { "{t.welcome_tip_reorder}" }
                li { "{t.welcome_tip_autoplay}" }
            }
            div { class: "flex justify-end",
                button {
                    class: "px-4 py-2 rounded-full bg-emerald-500 hover:bg-emerald-400 text-white text-sm font-medium transition-colors",
                    onclick: move |_| on_close.call(()),
                    "{t.get_started}"
                }
            }
        }
    }
}

#[component]
pub fn CreatePlaylistDialog(on_close: EventHandler<()>, on_created: EventHandler<Playlist>) -> Element {
    let store = use_context::<StoreHandle>();
    let toaster = use_context::<Toaster>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let store = store.clone();
        let name = name.peek().clone();
        let description = description.peek().clone();
        saving.set(true);
        spawn(async move {
            match create_playlist(&*store, &name, &description).await {
                Ok(playlist) => {
                    toaster.success(fill(t.playlist_created, &[("name", &playlist.name)]));
                    library_version.bump();
                    on_created.call(playlist);
                }
                Err(e) => error.set(Some(t.library_error(&e))),
            }
            saving.set(false);
        });
    };

    rsx! {
        DialogFrame { title: "{t.new_playlist}", on_close,
            form { class: "space-y-4", onsubmit: on_submit,
                input {
                    class: "w-full px-3 py-2 rounded-lg bg-zinc-950 border border-zinc-800 text-white text-sm focus:outline-none focus:border-emerald-500",
                    placeholder: t.name_placeholder,
                    autofocus: true,
                    value: "{name}",
                    oninput: move |e| name.set(e.value()),
                }
                textarea {
                    class: "w-full px-3 py-2 rounded-lg bg-zinc-950 border border-zinc-800 text-white text-sm focus:outline-none focus:border-emerald-500",
                    placeholder: t.description_placeholder,
                    rows: "3",
                    value: "{description}",
                    oninput: move |e| description.set(e.value()),
                }
                if let Some(message) = error() {
                    p { class: "text-sm text-red-400", "{message}" }
                }
                div { class: "flex justify-end gap-2",
                    button {
                        r#type: "button",
                        class: "px-4 py-2 rounded-full text-zinc-300 hover:text-white text-sm transition-colors",
                        onclick: move |_| on_close.call(()),
                        "{t.cancel}"
                    }
                    button {
                        r#type: "submit",
                        class: "px-4 py-2 rounded-full bg-emerald-500 hover:bg-emerald-400 disabled:opacity-50 text-white text-sm font-medium transition-colors",
                        disabled: saving(),
                        if saving() { "{t.creating}" } else { "{t.create}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn AddToPlaylistDialog(video: Video, on_close: EventHandler<()>) -> Element {
    let store = use_context::<StoreHandle>();
    let playback = use_context::<Signal<PlaybackPointer>>();
    let toaster = use_context::<Toaster>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();

    let playlists = {
        let store = store.clone();
        use_resource(move || {
            let store = store.clone();
            let _version = library_version.get();
            async move { store.list_playlists().await }
        })
    };

    let title = fill(t.add_to_playlist_title, &[("title", video.display_title())]);

    rsx! {
        DialogFrame { title, on_close,
            {match playlists() {
                Some(Ok(playlists)) if !playlists.is_empty() => rsx! {
                    div { class: "space-y-1 max-h-80 overflow-y-auto",
                        for playlist in playlists {
                            {
                                let is_member = playlist.position_of(video.id).is_some();
                                let count = playlist.videos.len();
                                let store = store.clone();
                                let video = video.clone();
                                let playlist_id = playlist.id;
                                let name = playlist.name.clone();
                                rsx! {
                                    button {
                                        key: "{playlist_id}",
                                        class: "w-full flex items-center gap-3 p-3 rounded-xl hover:bg-zinc-800/60 transition-colors text-start disabled:opacity-50",
                                        disabled: is_member,
                                        onclick: move |_| {
                                            let store = store.clone();
                                            let video = video.clone();
                                            let name = name.clone();
                                            let mut playback = playback;
                                            spawn(async move {
                                                match add_to_playlist(&*store, &mut playback, playlist_id, &video).await {
                                                    Ok(true) => {
                                                        toaster.success(fill(t.added_to, &[("name", &name)]));
                                                        library_version.bump();
                                                        on_close.call(());
                                                    }
                                                    Ok(false) => toaster.warning(fill(t.already_in, &[("name", &name)])),
                                                    Err(e) => toaster.error(t.library_error(&e)),
                                                }
                                            });
                                        },
                                        Icon { name: "playlist".to_string(), class: "w-5 h-5 text-zinc-400".to_string() }
                                        div { class: "flex-1 min-w-0",
                                            p { class: "text-sm text-white truncate", "{playlist.name}" }
                                            p { class: "text-xs text-zinc-500", "{t.videos(count)}" }
                                        }
                                        if is_member {
                                            Icon { name: "check".to_string(), class: "w-4 h-4 text-emerald-400".to_string() }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Ok(_)) => rsx! {
                    p { class: "text-sm text-zinc-400", "{t.no_playlists_to_add}" }
                },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-400", {fill(t.loading_failed, &[("error", &e.to_string())])} }
                },
                None => rsx! {
                    div { class: "flex justify-center py-6",
                        Icon { name: "loader".to_string(), class: "w-6 h-6 text-zinc-500".to_string() }
                    }
                },
            }}
        }
    }
}
