use crate::components::{use_strings, Icon, LibraryVersion, StoreHandle};
use crate::db::AppSettings;
use crate::i18n::fill;
use crate::library::record_duration;
use crate::playback::{PlaybackPointer, PlaybackStore};
use crate::utils::format_duration;
use dioxus::prelude::*;

const PLAYER_ELEMENT_ID: &str = "reelshelf-player";

#[cfg(target_arch = "wasm32")]
fn player_duration() -> Option<f64> {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()?
        .document()?
        .get_element_by_id(PLAYER_ELEMENT_ID)?;
    let video = element.dyn_into::<web_sys::HtmlVideoElement>().ok()?;
    Some(video.duration())
}

#[cfg(not(target_arch = "wasm32"))]
fn player_duration() -> Option<f64> {
    None
}

/// Plays the video the playback pointer points at.
#[component]
pub fn Player() -> Element {
    let mut playback = use_context::<Signal<PlaybackPointer>>();
    let settings = use_context::<Signal<AppSettings>>();
    let store = use_context::<StoreHandle>();
    let mut library_version = use_context::<LibraryVersion>();
    let t = use_strings();

    let pointer = playback();
    let Some(video) = pointer.video.clone() else {
        return rsx! {};
    };
    let video_id = video.id;
    let position = pointer
        .playlist
        .as_ref()
        .map(|p| {
            fill(
                t.position_in_playlist,
                &[
                    ("position", &(pointer.index + 1).to_string()),
                    ("count", &p.videos.len().to_string()),
                    ("name", &p.name),
                ],
            )
        });

    let on_ended = move |_| {
        if !settings.peek().autoplay_next {
            return;
        }
        let next = playback.peek().advance();
        if let Some(next) = next {
            playback.commit(next);
        }
    };

    let on_loaded = move |_| {
        let Some(seconds) = player_duration() else {
            return;
        };
        let store = store.clone();
        spawn(async move {
            match record_duration(&*store, video_id, seconds).await {
                Ok(()) => library_version.bump(),
                Err(e) => log::warn!("failed to record duration of video {video_id}: {e}"),
            }
        });
    };

    let on_close = move |_| {
        let current = playback.snapshot();
        playback.commit(PlaybackPointer {
            video: None,
            ..current
        });
    };

    rsx! {
        section { class: "rounded-2xl overflow-hidden bg-black border border-zinc-800/60 shadow-xl",
            video {
                id: PLAYER_ELEMENT_ID,
                class: "w-full aspect-video bg-black",
                src: "{video.url}",
                controls: true,
                autoplay: true,
                onended: on_ended,
                onloadedmetadata: on_loaded,
            }
            div { class: "flex items-center gap-3 px-4 py-3 bg-zinc-950/80",
                div { class: "flex-1 min-w-0",
                    p { class: "text-sm font-semibold text-white truncate", "{video.display_title()}" }
                    div { class: "flex items-center gap-2 text-xs text-zinc-500",
                        if let Some(position) = position {
                            span { "{position}" }
                        }
                        if let Some(duration) = video.duration {
                            span { "{format_duration(duration)}" }
                        }
                    }
                }
                button {
                    class: "p-2 rounded-lg text-zinc-400 hover:text-white hover:bg-zinc-800/60 transition-colors",
                    aria_label: t.close_player,
                    onclick: on_close,
                    Icon { name: "x".to_string(), class: "w-4 h-4".to_string() }
                }
            }
        }
    }
}
