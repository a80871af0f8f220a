use crate::components::views::{HomeView, PlaylistDetailView, PlaylistsView, SettingsView};
use crate::components::{
    view_label, AppView, Icon, Navigation, Sidebar, Toast, ToastStack, Toaster, WelcomeDialog,
};
use crate::db::{load_settings, AppSettings, AppStore};
use crate::i18n::{Language, Strings};
use crate::library::check_first_visit;
use crate::playback::PlaybackPointer;
use dioxus::prelude::*;
use std::ops::Deref;
use std::rc::Rc;

const BACK_SWIPE_THRESHOLD: f64 = 100.0;

/// Shared handle to the platform store.
#[derive(Clone)]
pub struct StoreHandle(Rc<AppStore>);

impl StoreHandle {
    pub fn new(store: AppStore) -> Self {
        Self(Rc::new(store))
    }
}

impl Deref for StoreHandle {
    type Target = AppStore;

    fn deref(&self) -> &AppStore {
        &self.0
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Bumped after every write so views reload what they show.
#[derive(Clone, Copy, PartialEq)]
pub struct LibraryVersion(pub Signal<u64>);

impl LibraryVersion {
    pub fn get(&self) -> u64 {
        (self.0)()
    }

    pub fn bump(&mut self) {
        let next = self.0.peek().wrapping_add(1);
        self.0.set(next);
    }
}

/// Text table for the language chosen in settings.
pub fn use_strings() -> &'static Strings {
    let settings = use_context::<Signal<AppSettings>>();
    let language = settings().language;
    language.strings()
}

#[component]
pub fn AppShell(store: StoreHandle) -> Element {
    let playback = use_signal(PlaybackPointer::default);
    let mut app_settings = use_signal(AppSettings::default);
    let toasts = use_signal(Vec::<Toast>::new);
    let next_toast_id = use_signal(|| 0u64);
    let toaster = Toaster::new(toasts, next_toast_id, app_settings);
    let current_view = use_signal(|| AppView::Home);
    let history = use_signal(Vec::<AppView>::new);
    let navigation = Navigation::new(current_view, history);
    let library_version = LibraryVersion(use_signal(|| 0u64));
    let mut sidebar_open = use_signal(|| false);
    let mut show_welcome = use_signal(|| false);
    let mut swipe_start = use_signal(|| None::<f64>);

    use_context_provider(|| store.clone());
    use_context_provider(|| playback);
    use_context_provider(|| app_settings);
    use_context_provider(|| toaster);
    use_context_provider(|| navigation);
    use_context_provider(|| library_version);

    // Load settings and the first-visit flag once on mount
    use_hook({
        let store = store.clone();
        move || {
            spawn(async move {
                app_settings.set(load_settings(&*store).await);
                match check_first_visit(&*store).await {
                    Ok(first) => show_welcome.set(first),
                    Err(e) => log::warn!("failed to read first-visit flag: {e}"),
                }
            });
        }
    });

    let view = navigation.current();
    let can_go_back = navigation.can_go_back();
    let language = app_settings().language;
    let t = language.strings();

    rsx! {
        div {
            class: "app-container flex min-h-screen text-white overflow-hidden",
            lang: language.code(),
            dir: language.dir(),
            if sidebar_open() {
                div {
                    class: "fixed inset-0 bg-black/60 backdrop-blur-sm z-30 lg:hidden",
                    onclick: move |_| sidebar_open.set(false),
                }
            }

            Sidebar { sidebar_open }

            div { class: "flex-1 flex flex-col overflow-hidden",
                header { class: "lg:hidden border-b border-zinc-800/60 bg-zinc-950/80 backdrop-blur-xl",
                    div { class: "flex items-center justify-between px-4 py-3",
                        if can_go_back {
                            button {
                                class: "p-2 rounded-lg text-zinc-300 hover:text-white hover:bg-zinc-800/60 transition-colors",
                                aria_label: t.go_back,
                                onclick: move |_| {
                                    let _ = navigation.go_back();
                                },
                                Icon {
                                    name: "arrow-left".to_string(),
                                    class: "w-5 h-5 rtl:rotate-180".to_string(),
                                }
                            }
                        } else {
                            button {
                                class: "p-2 rounded-lg text-zinc-300 hover:text-white hover:bg-zinc-800/60 transition-colors",
                                aria_label: t.open_menu,
                                onclick: move |_| sidebar_open.set(true),
                                Icon {
                                    name: "menu".to_string(),
                                    class: "w-5 h-5".to_string(),
                                }
                            }
                        }
                        div { class: "flex flex-col items-center text-center",
                            span { class: "text-xs uppercase tracking-widest text-zinc-500",
                                "ReelShelf"
                            }
                            span { class: "text-sm font-semibold text-white", "{view_label(&view, t)}" }
                        }
                        div { class: "w-9" }
                    }
                }

                main {
                    class: "flex-1 overflow-y-auto main-scroll",
                    onpointerdown: move |evt: PointerEvent| {
                        if evt.pointer_type() == "touch" {
                            swipe_start.set(Some(evt.client_coordinates().x));
                        }
                    },
                    onpointermove: move |evt: PointerEvent| {
                        let Some(start) = swipe_start() else {
                            return;
                        };
                        // Back is a swipe towards the reading end
                        let travel = evt.client_coordinates().x - start;
                        let travel = if language == Language::Arabic { -travel } else { travel };
                        if travel > BACK_SWIPE_THRESHOLD
                            && navigation.can_go_back()
                        {
                            navigation.go_back();
                            swipe_start.set(None);
                        }
                    },
                    onpointerup: move |_| swipe_start.set(None),
                    onpointerleave: move |_| swipe_start.set(None),
                    div { class: "page-shell",
                        {match view {
                            AppView::Home => rsx! { HomeView {} },
                            AppView::Playlists => rsx! { PlaylistsView {} },
                            AppView::PlaylistDetail(playlist_id) => rsx! {
                                PlaylistDetailView { key: "{playlist_id}", playlist_id }
                            },
                            AppView::Settings => rsx! { SettingsView {} },
                        }}
                    }
                }
            }

            ToastStack {}

            if show_welcome() {
                WelcomeDialog { on_close: move |_| show_welcome.set(false) }
            }
        }
    }
}

#[component]
pub fn StartupError(message: String) -> Element {
    // Settings live in the store that failed to open
    let t = Language::default().strings();

    rsx! {
        div { class: "min-h-screen flex items-center justify-center p-6 text-white",
            div { class: "max-w-md text-center space-y-3",
                Icon { name: "alert".to_string(), class: "w-10 h-10 mx-auto text-red-400".to_string() }
                h1 { class: "text-xl font-semibold", "{t.startup_failed}" }
                p { class: "text-sm text-zinc-400", "{message}" }
            }
        }
    }
}
