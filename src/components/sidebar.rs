use crate::components::{use_strings, AppView, Icon, Navigation};
use crate::playback::PlaybackPointer;
use dioxus::prelude::*;

#[component]
pub fn Sidebar(sidebar_open: Signal<bool>) -> Element {
    let navigation = use_context::<Navigation>();
    let playback = use_context::<Signal<PlaybackPointer>>();
    let t = use_strings();
    let view = navigation.current();

    let active_playlist = playback().playlist.map(|p| (p.id, p.name));
    let go = move |target: AppView| {
        let mut sidebar_open = sidebar_open;
        navigation.navigate_to(target);
        sidebar_open.set(false);
    };

    let drawer_class = if sidebar_open() {
        "translate-x-0"
    } else {
        "-translate-x-full rtl:translate-x-full lg:translate-x-0 lg:rtl:translate-x-0"
    };

    rsx! {
        aside { class: "fixed lg:static inset-y-0 start-0 z-40 w-64 bg-zinc-950/90 lg:bg-zinc-950/50 border-e border-zinc-800/50 flex flex-col h-full backdrop-blur-xl transition-transform {drawer_class}",
            div { class: "p-6 border-b border-zinc-800/50",
                div { class: "flex items-center gap-3",
                    div { class: "w-10 h-10 rounded-xl bg-gradient-to-br from-emerald-500 to-teal-600 flex items-center justify-center text-white font-bold text-lg shadow-lg shadow-emerald-500/20",
                        "R"
                    }
                    div {
                        h1 { class: "text-lg font-bold text-white", "ReelShelf" }
                        p { class: "text-xs text-zinc-500", "{t.app_tagline}" }
                    }
                }
            }

            nav { class: "flex-1 overflow-y-auto p-4 space-y-1",
                p { class: "text-xs font-semibold text-zinc-500 uppercase tracking-wider mb-3 px-3",
                    "{t.nav_library}"
                }
                NavItem {
                    icon: "home",
                    label: "{t.nav_home}",
                    active: matches!(view, AppView::Home),
                    onclick: move |_| go(AppView::Home),
                }
                NavItem {
                    icon: "playlist",
                    label: "{t.nav_playlists}",
                    active: matches!(view, AppView::Playlists),
                    onclick: move |_| go(AppView::Playlists),
                }
                NavItem {
                    icon: "settings",
                    label: "{t.nav_settings}",
                    active: matches!(view, AppView::Settings),
                    onclick: move |_| go(AppView::Settings),
                }

                if let Some((playlist_id, name)) = active_playlist {
                    div { class: "mt-6",
                        p { class: "text-xs font-semibold text-zinc-500 uppercase tracking-wider mb-3 px-3",
                            "{t.now_playing_from}"
                        }
                        NavItem {
                            icon: "video",
                            label: name,
                            active: view == AppView::PlaylistDetail(playlist_id),
                            onclick: move |_| go(AppView::PlaylistDetail(playlist_id)),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NavItem(icon: String, label: String, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let base_class = "flex items-center gap-3 px-3 py-2.5 rounded-xl text-sm font-medium transition-all duration-200 cursor-pointer";
    let active_class = if active {
        "bg-gradient-to-r from-emerald-500/20 to-teal-500/10 text-emerald-400 shadow-sm"
    } else {
        "text-zinc-400 hover:text-white hover:bg-zinc-800/50"
    };

    rsx! {
        button {
            class: "{base_class} {active_class} w-full",
            onclick: move |e| onclick.call(e),
            Icon { name: icon.clone(), class: "w-5 h-5".to_string() }
            span { class: "truncate", "{label}" }
        }
    }
}
