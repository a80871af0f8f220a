use crate::components::{
    use_strings, AppView, CreatePlaylistDialog, Icon, LibraryVersion, Navigation, StoreHandle,
    Toaster,
};
use crate::db::{MediaStore, Playlist};
use crate::i18n::fill;
use crate::library::delete_playlist;
use crate::playback::PlaybackPointer;
use crate::utils::format_duration;
use dioxus::prelude::*;

#[component]
pub fn PlaylistsView() -> Element {
    let store = use_context::<StoreHandle>();
    let navigation = use_context::<Navigation>();
    let library_version = use_context::<LibraryVersion>();
    let t = use_strings();
    let mut creating = use_signal(|| false);

    let playlists = {
        let store = store.clone();
        use_resource(move || {
            let store = store.clone();
            let _version = library_version.get();
            async move { store.list_playlists().await }
        })
    };

    rsx! {
        div { class: "space-y-8",
            header { class: "flex items-end justify-between gap-4",
                div {
                    h1 { class: "text-3xl font-bold text-white mb-2", "{t.nav_playlists}" }
                    p { class: "text-zinc-400", "{t.playlists_subtitle}" }
                }
                button {
                    class: "flex items-center gap-2 px-4 py-2 rounded-full bg-emerald-500 hover:bg-emerald-400 text-white text-sm font-medium transition-colors",
                    onclick: move |_| creating.set(true),
                    Icon { name: "plus".to_string(), class: "w-4 h-4".to_string() }
                    "{t.new_playlist}"
                }
            }

            {match playlists() {
                Some(Ok(playlists)) if !playlists.is_empty() => rsx! {
                    div { class: "grid grid-cols-2 sm:grid-cols-3 md:grid-cols-4 lg:grid-cols-5 gap-4",
                        for playlist in playlists {
                            PlaylistCard {
                                key: "{playlist.id}",
                                playlist: playlist.clone(),
                                onclick: move |_| navigation.navigate_to(AppView::PlaylistDetail(playlist.id)),
                            }
                        }
                    }
                },
                Some(Ok(_)) => rsx! {
                    div { class: "flex flex-col items-center justify-center py-20",
                        Icon { name: "playlist".to_string(), class: "w-16 h-16 text-zinc-600 mb-4".to_string() }
                        h2 { class: "text-xl font-semibold text-white mb-2", "{t.no_playlists}" }
                        p { class: "text-zinc-400", "{t.no_playlists_hint}" }
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

        if creating() {
            CreatePlaylistDialog {
                on_close: move |_| creating.set(false),
                on_created: move |playlist: Playlist| {
                    creating.set(false);
                    navigation.navigate_to(AppView::PlaylistDetail(playlist.id));
                },
            }
        }
    }
}

#[component]
fn PlaylistCard(playlist: Playlist, onclick: EventHandler<MouseEvent>) -> Element {
    let store = use_context::<StoreHandle>();
    let mut playback = use_context::<Signal<PlaybackPointer>>();
    let toaster = use_context::<Toaster>();
    let navigation = use_context::<Navigation>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();

    let count_label = t.videos(playlist.videos.len());
    let total: f64 = playlist.videos.iter().filter_map(|v| v.duration).sum();
    let playlist_id = playlist.id;

    let on_delete = {
        let name = playlist.name.clone();
        move |evt: MouseEvent| {
            evt.stop_propagation();
            let store = store.clone();
            let name = name.clone();
            spawn(async move {
                match delete_playlist(&*store, &mut playback, playlist_id).await {
                    Ok(()) => {
                        navigation.forget(&AppView::PlaylistDetail(playlist_id));
                        toaster.success(fill(t.playlist_deleted, &[("name", &name)]));
                        library_version.bump();
                    }
                    Err(e) => toaster.error(t.library_error(&e)),
                }
            });
        }
    };

    rsx! {
        div {
            class: "group text-start cursor-pointer",
            onclick: move |e| onclick.call(e),
            div { class: "aspect-video rounded-xl mb-3 overflow-hidden relative shadow-lg group-hover:shadow-xl transition-shadow bg-gradient-to-br from-emerald-700 to-teal-800 flex items-center justify-center",
                Icon { name: "playlist".to_string(), class: "w-10 h-10 text-white/70".to_string() }
                button {
                    class: "absolute top-2 end-2 p-1.5 rounded-lg bg-black/50 text-zinc-300 hover:text-red-300 opacity-0 group-hover:opacity-100 transition-opacity",
                    aria_label: t.delete_playlist,
                    onclick: on_delete,
                    Icon { name: "trash".to_string(), class: "w-4 h-4".to_string() }
                }
            }
            p { class: "font-medium text-white text-sm truncate group-hover:text-emerald-400 transition-colors", "{playlist.name}" }
            p { class: "text-xs text-zinc-400", "{count_label} • {format_duration(total)}" }
            if !playlist.description.is_empty() {
                p { class: "text-xs text-zinc-500 truncate", "{playlist.description}" }
            }
        }
    }
}
