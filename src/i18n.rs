//! User-facing text in every supported language.
//!
//! Each language is one static [`Strings`] table. Messages that carry values
//! use `{name}` placeholders filled in by [`fill`].

use crate::library::LibraryError;
use crate::playlist::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// BCP 47 tag, used for the `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.code() == code)
    }

    /// Text direction, used for the `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Language::English => "ltr",
            Language::Arabic => "rtl",
        }
    }

    /// The language's name written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "العربية",
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Arabic => &AR,
        }
    }
}

/// Replaces each `{key}` in `template` with its value.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}

pub struct Strings {
    pub app_tagline: &'static str,
    pub startup_failed: &'static str,
    pub nav_library: &'static str,
    pub nav_home: &'static str,
    pub nav_playlists: &'static str,
    pub nav_settings: &'static str,
    pub nav_playlist: &'static str,
    pub now_playing_from: &'static str,
    pub go_back: &'static str,
    pub open_menu: &'static str,
    pub close: &'static str,
    pub cancel: &'static str,
    pub dismiss: &'static str,
    pub loading_failed: &'static str,

    pub home_title: &'static str,
    pub home_subtitle: &'static str,
    pub url_placeholder: &'static str,
    pub play: &'static str,
    pub recently_watched: &'static str,
    pub nothing_watched: &'static str,
    pub today_at: &'static str,
    pub date_format: &'static str,
    pub rename: &'static str,
    pub add_to_playlist: &'static str,
    pub delete_from_history: &'static str,
    pub removed_from_history: &'static str,

    pub playlists_subtitle: &'static str,
    pub new_playlist: &'static str,
    pub no_playlists: &'static str,
    pub no_playlists_hint: &'static str,
    pub delete_playlist: &'static str,
    pub playlist_deleted: &'static str,
    pub video_one: &'static str,
    pub video_many: &'static str,

    pub play_all: &'static str,
    pub playlist_empty: &'static str,
    pub pick_video: &'static str,
    pub playlist_not_found: &'static str,
    pub playlist_maybe_deleted: &'static str,

    pub now_playing: &'static str,
    pub shuffle: &'static str,
    pub clear_all: &'static str,
    pub clear_all_warning: &'static str,
    pub clear: &'static str,
    pub no_videos_in_playlist: &'static str,
    pub playlist_gone: &'static str,
    pub drag_to_reorder: &'static str,
    pub remove_from_playlist: &'static str,

    pub not_enough_to_shuffle: &'static str,
    pub order_saved: &'static str,
    pub shuffled: &'static str,
    pub removed_from_playlist: &'static str,
    pub playlist_cleared: &'static str,
    pub save_failed: &'static str,
    pub history_cleanup_failed: &'static str,

    pub welcome_title: &'static str,
    pub welcome_intro: &'static str,
    pub welcome_tip_playlists: &'static str,
    pub welcome_tip_reorder: &'static str,
    pub welcome_tip_autoplay: &'static str,
    pub get_started: &'static str,
    pub name_placeholder: &'static str,
    pub description_placeholder: &'static str,
    pub create: &'static str,
    pub creating: &'static str,
    pub playlist_created: &'static str,
    pub add_to_playlist_title: &'static str,
    pub added_to: &'static str,
    pub already_in: &'static str,
    pub no_playlists_to_add: &'static str,

    pub close_player: &'static str,
    pub position_in_playlist: &'static str,

    pub settings_subtitle: &'static str,
    pub playback_section: &'static str,
    pub autoplay_next: &'static str,
    pub autoplay_next_hint: &'static str,
    pub history_section: &'static str,
    pub recent_limit: &'static str,
    pub recent_limit_hint: &'static str,
    pub notifications_section: &'static str,
    pub toast_duration: &'static str,
    pub seconds: &'static str,
    pub language_section: &'static str,
    pub language_hint: &'static str,
    pub settings_save_failed: &'static str,

    pub invalid_url: &'static str,
    pub empty_name: &'static str,
    pub video_not_found: &'static str,
    pub playlist_missing: &'static str,
    pub storage_failed: &'static str,
}

impl Strings {
    /// "1 video", "3 videos".
    pub fn videos(&self, count: usize) -> String {
        let template = if count == 1 {
            self.video_one
        } else {
            self.video_many
        };
        fill(template, &[("count", &count.to_string())])
    }

    pub fn library_error(&self, error: &LibraryError) -> String {
        match error {
            LibraryError::InvalidUrl(url) => fill(self.invalid_url, &[("url", url)]),
            LibraryError::EmptyName => self.empty_name.to_string(),
            LibraryError::VideoNotFound(_) => self.video_not_found.to_string(),
            LibraryError::PlaylistNotFound(_) => self.playlist_missing.to_string(),
            LibraryError::Db(e) => fill(self.storage_failed, &[("error", &e.to_string())]),
        }
    }

    pub fn engine_error(&self, error: &EngineError) -> String {
        match error {
            EngineError::Persist { source, .. } => {
                fill(self.save_failed, &[("error", &source.to_string())])
            }
            EngineError::HistoryCleanup { failed, .. } => fill(
                self.history_cleanup_failed,
                &[("count", &failed.len().to_string())],
            ),
        }
    }
}

static EN: Strings = Strings {
    app_tagline: "Your video shelf",
    startup_failed: "ReelShelf could not open its library",
    nav_library: "Library",
    nav_home: "Home",
    nav_playlists: "Playlists",
    nav_settings: "Settings",
    nav_playlist: "Playlist",
    now_playing_from: "Now playing from",
    go_back: "Go back",
    open_menu: "Open menu",
    close: "Close",
    cancel: "Cancel",
    dismiss: "Dismiss",
    loading_failed: "Could not load: {error}",

    home_title: "Watch",
    home_subtitle: "Open a video link or pick up where you left off",
    url_placeholder: "https://example.com/video.mp4",
    play: "Play",
    recently_watched: "Recently watched",
    nothing_watched: "Nothing watched yet",
    today_at: "Today at {time}",
    date_format: "%b %-d, %Y",
    rename: "Rename",
    add_to_playlist: "Add to playlist",
    delete_from_history: "Delete from history",
    removed_from_history: "Removed \"{title}\" from history",

    playlists_subtitle: "Group videos to watch them back to back",
    new_playlist: "New playlist",
    no_playlists: "No playlists yet",
    no_playlists_hint: "Create one, then add videos from your history",
    delete_playlist: "Delete playlist",
    playlist_deleted: "Deleted playlist \"{name}\"",
    video_one: "{count} video",
    video_many: "{count} videos",

    play_all: "Play all",
    playlist_empty: "This playlist is empty",
    pick_video: "Pick a video to start this playlist",
    playlist_not_found: "Playlist not found",
    playlist_maybe_deleted: "It may have been deleted.",

    now_playing: "Now playing",
    shuffle: "Shuffle",
    clear_all: "Clear all",
    clear_all_warning: "Remove all {count} videos from \"{name}\"? They will also be deleted from your history.",
    clear: "Clear",
    no_videos_in_playlist: "No videos in this playlist",
    playlist_gone: "This playlist no longer exists.",
    drag_to_reorder: "Drag to reorder",
    remove_from_playlist: "Remove from playlist",

    not_enough_to_shuffle: "Add at least two videos to shuffle this playlist",
    order_saved: "Playlist order saved",
    shuffled: "Playlist shuffled",
    removed_from_playlist: "Removed \"{title}\" from the playlist",
    playlist_cleared: "Cleared all videos from \"{name}\"",
    save_failed: "Could not save the playlist: {error}",
    history_cleanup_failed: "The playlist was cleared, but {count} videos could not be removed from history",

    welcome_title: "Welcome to ReelShelf",
    welcome_intro: "Paste a link to any video file to start watching. Everything you open is kept in your history.",
    welcome_tip_playlists: "Collect videos into playlists and play them back in order.",
    welcome_tip_reorder: "Drag entries to reorder a playlist, or shuffle it.",
    welcome_tip_autoplay: "When a video ends, the next one in the playlist starts.",
    get_started: "Get started",
    name_placeholder: "Name",
    description_placeholder: "Description (optional)",
    create: "Create",
    creating: "Creating…",
    playlist_created: "Created playlist \"{name}\"",
    add_to_playlist_title: "Add \"{title}\" to playlist",
    added_to: "Added to \"{name}\"",
    already_in: "Already in \"{name}\"",
    no_playlists_to_add: "No playlists yet. Create one from the Playlists page.",

    close_player: "Close player",
    position_in_playlist: "{position} of {count} in {name}",

    settings_subtitle: "Playback, history and language preferences",
    playback_section: "Playback",
    autoplay_next: "Play next video automatically",
    autoplay_next_hint: "When a video ends, continue with the next one in its playlist",
    history_section: "History",
    recent_limit: "Recently watched list size",
    recent_limit_hint: "How many videos the home page lists",
    notifications_section: "Notifications",
    toast_duration: "Notification duration",
    seconds: "{value} s",
    language_section: "Language",
    language_hint: "Used for every label and message",
    settings_save_failed: "Could not save settings: {error}",

    invalid_url: "Not a playable link: {url}",
    empty_name: "Playlist name cannot be empty",
    video_not_found: "That video is no longer in your history",
    playlist_missing: "That playlist no longer exists",
    storage_failed: "Storage error: {error}",
};

static AR: Strings = Strings {
    app_tagline: "رف الفيديو الخاص بك",
    startup_failed: "تعذّر على ReelShelf فتح المكتبة",
    nav_library: "المكتبة",
    nav_home: "الرئيسية",
    nav_playlists: "قوائم التشغيل",
    nav_settings: "الإعدادات",
    nav_playlist: "قائمة التشغيل",
    now_playing_from: "يُشغَّل الآن من",
    go_back: "رجوع",
    open_menu: "فتح القائمة",
    close: "إغلاق",
    cancel: "إلغاء",
    dismiss: "تجاهل",
    loading_failed: "تعذّر التحميل: {error}",

    home_title: "مشاهدة",
    home_subtitle: "افتح رابط فيديو أو تابع من حيث توقفت",
    url_placeholder: "https://example.com/video.mp4",
    play: "تشغيل",
    recently_watched: "شوهد مؤخرًا",
    nothing_watched: "لم تشاهد شيئًا بعد",
    today_at: "اليوم الساعة {time}",
    date_format: "%Y/%m/%d",
    rename: "إعادة التسمية",
    add_to_playlist: "إضافة إلى قائمة تشغيل",
    delete_from_history: "حذف من السجل",
    removed_from_history: "تم حذف \"{title}\" من السجل",

    playlists_subtitle: "اجمع مقاطع الفيديو لمشاهدتها تباعًا",
    new_playlist: "قائمة تشغيل جديدة",
    no_playlists: "لا توجد قوائم تشغيل بعد",
    no_playlists_hint: "أنشئ قائمة ثم أضف إليها مقاطع من سجلك",
    delete_playlist: "حذف قائمة التشغيل",
    playlist_deleted: "تم حذف قائمة التشغيل \"{name}\"",
    video_one: "فيديو واحد",
    video_many: "{count} فيديو",

    play_all: "تشغيل الكل",
    playlist_empty: "قائمة التشغيل هذه فارغة",
    pick_video: "اختر فيديو لبدء قائمة التشغيل",
    playlist_not_found: "قائمة التشغيل غير موجودة",
    playlist_maybe_deleted: "ربما تم حذفها.",

    now_playing: "يُشغَّل الآن",
    shuffle: "ترتيب عشوائي",
    clear_all: "مسح الكل",
    clear_all_warning: "هل تريد إزالة جميع مقاطع الفيديو ({count}) من \"{name}\"؟ سيتم حذفها من سجلك أيضًا.",
    clear: "مسح",
    no_videos_in_playlist: "لا توجد مقاطع فيديو في قائمة التشغيل هذه",
    playlist_gone: "قائمة التشغيل هذه لم تعد موجودة.",
    drag_to_reorder: "اسحب لإعادة الترتيب",
    remove_from_playlist: "إزالة من قائمة التشغيل",

    not_enough_to_shuffle: "أضف مقطعين على الأقل لترتيب هذه القائمة عشوائيًا",
    order_saved: "تم حفظ ترتيب قائمة التشغيل",
    shuffled: "تم ترتيب قائمة التشغيل عشوائيًا",
    removed_from_playlist: "تمت إزالة \"{title}\" من قائمة التشغيل",
    playlist_cleared: "تم مسح جميع المقاطع من \"{name}\"",
    save_failed: "تعذّر حفظ قائمة التشغيل: {error}",
    history_cleanup_failed: "تم مسح قائمة التشغيل، لكن تعذّر حذف {count} من المقاطع من السجل",

    welcome_title: "مرحبًا بك في ReelShelf",
    welcome_intro: "الصق رابط أي ملف فيديو لبدء المشاهدة. كل ما تفتحه يُحفظ في سجلك.",
    welcome_tip_playlists: "اجمع المقاطع في قوائم تشغيل وشغّلها بالترتيب.",
    welcome_tip_reorder: "اسحب العناصر لإعادة ترتيب القائمة، أو رتّبها عشوائيًا.",
    welcome_tip_autoplay: "عند انتهاء فيديو يبدأ الفيديو التالي في القائمة.",
    get_started: "ابدأ",
    name_placeholder: "الاسم",
    description_placeholder: "الوصف (اختياري)",
    create: "إنشاء",
    creating: "جارٍ الإنشاء…",
    playlist_created: "تم إنشاء قائمة التشغيل \"{name}\"",
    add_to_playlist_title: "إضافة \"{title}\" إلى قائمة تشغيل",
    added_to: "تمت الإضافة إلى \"{name}\"",
    already_in: "موجود بالفعل في \"{name}\"",
    no_playlists_to_add: "لا توجد قوائم تشغيل بعد. أنشئ واحدة من صفحة قوائم التشغيل.",

    close_player: "إغلاق المشغّل",
    position_in_playlist: "{position} من {count} في {name}",

    settings_subtitle: "تفضيلات التشغيل والسجل واللغة",
    playback_section: "التشغيل",
    autoplay_next: "تشغيل الفيديو التالي تلقائيًا",
    autoplay_next_hint: "عند انتهاء فيديو، تابع بالفيديو التالي في قائمته",
    history_section: "السجل",
    recent_limit: "عدد المقاطع المعروضة في السجل",
    recent_limit_hint: "عدد المقاطع التي تعرضها الصفحة الرئيسية",
    notifications_section: "الإشعارات",
    toast_duration: "مدة الإشعار",
    seconds: "{value} ث",
    language_section: "اللغة",
    language_hint: "تُستخدم لجميع العناوين والرسائل",
    settings_save_failed: "تعذّر حفظ الإعدادات: {error}",

    invalid_url: "ليس رابطًا قابلًا للتشغيل: {url}",
    empty_name: "لا يمكن أن يكون اسم قائمة التشغيل فارغًا",
    video_not_found: "هذا الفيديو لم يعد في سجلك",
    playlist_missing: "قائمة التشغيل هذه لم تعد موجودة",
    storage_failed: "خطأ في التخزين: {error}",
};
