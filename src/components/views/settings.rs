use crate::components::{use_strings, Icon, StoreHandle, Toaster};
use crate::db::{save_settings, AppSettings, RECENT_LIMIT_RANGE, TOAST_DURATION_RANGE_MS};
use crate::i18n::{fill, Language};
use dioxus::prelude::*;

/// Applies `change` to the live settings and writes them through.
fn update_settings(
    store: StoreHandle,
    mut app_settings: Signal<AppSettings>,
    toaster: Toaster,
    change: impl FnOnce(&mut AppSettings),
) {
    let mut settings = app_settings.peek().clone();
    change(&mut settings);
    let settings = settings.normalized();
    if settings == *app_settings.peek() {
        return;
    }
    app_settings.set(settings.clone());
    spawn(async move {
        if let Err(e) = save_settings(&*store, &settings).await {
            log::error!("failed to save settings: {e}");
            let t = toaster.strings();
            toaster.error(fill(t.settings_save_failed, &[("error", &e.to_string())]));
        }
    });
}

fn toggle_classes(on: bool) -> (&'static str, &'static str) {
    if on {
        (
            "w-12 h-6 bg-emerald-500 rounded-full relative transition-colors shrink-0",
            "w-5 h-5 bg-white rounded-full absolute top-0.5 end-0.5 transition-all",
        )
    } else {
        (
            "w-12 h-6 bg-zinc-700 rounded-full relative transition-colors shrink-0",
            "w-5 h-5 bg-zinc-400 rounded-full absolute top-0.5 start-0.5 transition-all",
        )
    }
}

#[component]
pub fn SettingsView() -> Element {
    let store = use_context::<StoreHandle>();
    let app_settings = use_context::<Signal<AppSettings>>();
    let toaster = use_context::<Toaster>();
    let t = use_strings();

    let on_autoplay_toggle = {
        let store = store.clone();
        move |_: MouseEvent| {
            update_settings(store.clone(), app_settings, toaster, |settings| {
                settings.autoplay_next = !settings.autoplay_next;
            })
        }
    };

    let on_recent_limit_change = {
        let store = store.clone();
        move |e: Event<FormData>| {
            if let Ok(limit) = e.value().parse::<usize>() {
                update_settings(store.clone(), app_settings, toaster, move |settings| {
                    settings.recent_limit = limit;
                });
            }
        }
    };

    let on_toast_duration_change = {
        let store = store.clone();
        move |e: Event<FormData>| {
            if let Ok(seconds) = e.value().parse::<u32>() {
                update_settings(store.clone(), app_settings, toaster, move |settings| {
                    settings.toast_duration_ms = seconds.saturating_mul(1000);
                });
            }
        }
    };

    let on_language_change = {
        let store = store.clone();
        move |e: Event<FormData>| {
            if let Some(language) = Language::from_code(&e.value()) {
                update_settings(store.clone(), app_settings, toaster, move |settings| {
                    settings.language = language;
                });
            }
        }
    };

    let settings = app_settings();
    let (autoplay_track, autoplay_knob) = toggle_classes(settings.autoplay_next);
    let toast_seconds = settings.toast_duration_ms / 1000;
    let toast_label = fill(t.seconds, &[("value", &toast_seconds.to_string())]);

    rsx! {
        div { class: "space-y-8 max-w-2xl",
            header {
                h1 { class: "text-3xl font-bold text-white mb-2", "{t.nav_settings}" }
                p { class: "text-zinc-400", "{t.settings_subtitle}" }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                h2 { class: "text-lg font-semibold text-white mb-6", "{t.playback_section}" }
                div { class: "flex items-center justify-between gap-4",
                    div {
                        p { class: "font-medium text-white", "{t.autoplay_next}" }
                        p { class: "text-sm text-zinc-400", "{t.autoplay_next_hint}" }
                    }
                    button {
                        class: "{autoplay_track}",
                        role: "switch",
                        aria_checked: settings.autoplay_next,
                        aria_label: t.autoplay_next,
                        onclick: on_autoplay_toggle,
                        div { class: "{autoplay_knob}" }
                    }
                }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                h2 { class: "text-lg font-semibold text-white mb-6", "{t.history_section}" }
                label { class: "block text-sm font-medium text-zinc-400 mb-1", "{t.recent_limit}" }
                p { class: "text-xs text-zinc-500 mb-3", "{t.recent_limit_hint}" }
                input {
                    r#type: "number",
                    min: RECENT_LIMIT_RANGE.0 as i64,
                    max: RECENT_LIMIT_RANGE.1 as i64,
                    value: settings.recent_limit as i64,
                    class: "w-32 px-3 py-2 bg-zinc-900/50 border border-zinc-700 rounded-lg text-white focus:outline-none focus:border-emerald-500/50",
                    onchange: on_recent_limit_change,
                }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                h2 { class: "text-lg font-semibold text-white mb-6", "{t.notifications_section}" }
                label { class: "block text-sm font-medium text-zinc-400 mb-3", "{t.toast_duration}" }
                div { class: "flex items-center gap-4",
                    input {
                        r#type: "range",
                        min: (TOAST_DURATION_RANGE_MS.0 / 1000) as i64,
                        max: (TOAST_DURATION_RANGE_MS.1 / 1000) as i64,
                        value: toast_seconds as i64,
                        class: "flex-1 h-2 bg-zinc-700 rounded-lg appearance-none cursor-pointer accent-emerald-500",
                        onchange: on_toast_duration_change,
                    }
                    span { class: "text-sm text-zinc-400 w-12 text-end", "{toast_label}" }
                }
            }

            section { class: "bg-zinc-800/30 rounded-2xl border border-zinc-700/30 p-6",
                div { class: "flex items-center gap-3 mb-6",
                    Icon { name: "globe".to_string(), class: "w-5 h-5 text-zinc-400".to_string() }
                    h2 { class: "text-lg font-semibold text-white", "{t.language_section}" }
                }
                p { class: "text-sm text-zinc-400 mb-3", "{t.language_hint}" }
                select {
                    class: "w-48 px-3 py-2 bg-zinc-900/50 border border-zinc-700 rounded-lg text-white focus:outline-none focus:border-emerald-500/50",
                    value: settings.language.code(),
                    onchange: on_language_change,
                    for language in Language::ALL {
                        option {
                            key: "{language.code()}",
                            value: language.code(),
                            selected: language == settings.language,
                            "{language.native_name()}"
                        }
                    }
                }
            }
        }
    }
}
