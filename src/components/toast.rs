use crate::components::{use_strings, Icon};
use crate::db::AppSettings;
use crate::i18n::{fill, Strings};
use crate::playlist::Notice;
use dioxus::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
async fn toast_delay_ms(ms: u32) {
    tokio::time::sleep(std::time::Duration::from_millis(ms as u64)).await;
}

#[cfg(target_arch = "wasm32")]
async fn toast_delay_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// User-facing message for an engine result, if it warrants one.
pub fn notice_toast(notice: &Notice, t: &Strings) -> Option<(ToastKind, String)> {
    let toast = match notice {
        Notice::Unchanged => return None,
        Notice::NotEnoughVideos => (ToastKind::Warning, t.not_enough_to_shuffle.to_string()),
        Notice::Reordered => (ToastKind::Success, t.order_saved.to_string()),
        Notice::Shuffled => (ToastKind::Success, t.shuffled.to_string()),
        Notice::Removed { title } => (
            ToastKind::Success,
            fill(t.removed_from_playlist, &[("title", title)]),
        ),
        Notice::Cleared { playlist } => (
            ToastKind::Success,
            fill(t.playlist_cleared, &[("name", playlist)]),
        ),
    };
    Some(toast)
}

#[derive(Clone, Copy, PartialEq)]
pub struct Toaster {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
    settings: Signal<AppSettings>,
}

impl Toaster {
    pub fn new(
        toasts: Signal<Vec<Toast>>,
        next_id: Signal<u64>,
        settings: Signal<AppSettings>,
    ) -> Self {
        Self {
            toasts,
            next_id,
            settings,
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id + 1);

        let mut toasts = self.toasts;
        toasts.with_mut(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let duration = self.settings.peek().toast_duration_ms;
        spawn(async move {
            toast_delay_ms(duration).await;
            toasts.with_mut(|list| list.retain(|toast| toast.id != id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    /// Text table for the current language.
    pub fn strings(&self) -> &'static Strings {
        self.settings.peek().language.strings()
    }

    pub fn notice(&self, notice: &Notice) {
        if let Some((kind, message)) = notice_toast(notice, self.strings()) {
            self.push(kind, message);
        }
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.with_mut(|list| list.retain(|toast| toast.id != id));
    }

    fn current(&self) -> Vec<Toast> {
        (self.toasts)()
    }
}

#[component]
pub fn ToastStack() -> Element {
    let toaster = use_context::<Toaster>();
    let t = use_strings();

    rsx! {
        div { class: "fixed bottom-4 end-4 z-50 flex flex-col gap-2 w-80 max-w-[calc(100vw-2rem)]",
            for toast in toaster.current() {
                {
                    let (tone, icon) = match toast.kind {
                        ToastKind::Success => ("border-emerald-500/40 text-emerald-200", "check"),
                        ToastKind::Warning => ("border-amber-500/40 text-amber-200", "alert"),
                        ToastKind::Error => ("border-red-500/50 text-red-200", "x"),
                    };
                    let id = toast.id;
                    rsx! {
                        div {
                            key: "{id}",
                            class: "flex items-start gap-3 px-4 py-3 rounded-xl border bg-zinc-900/95 shadow-xl backdrop-blur {tone}",
                            role: "status",
                            Icon { name: icon.to_string(), class: "w-4 h-4 mt-0.5 shrink-0".to_string() }
                            p { class: "flex-1 text-sm", "{toast.message}" }
                            button {
                                class: "text-zinc-500 hover:text-white transition-colors",
                                aria_label: t.dismiss,
                                onclick: move |_| toaster.dismiss(id),
                                Icon { name: "x".to_string(), class: "w-3.5 h-3.5".to_string() }
                            }
                        }
                    }
                }
            }
        }
    }
}
