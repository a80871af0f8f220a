//! Defines the shared application view state.

use crate::db::PlaylistId;
use crate::i18n::Strings;

#[derive(Debug, Clone, PartialEq)]
pub enum AppView {
    Home,
    Playlists,
    PlaylistDetail(PlaylistId),
    Settings,
}

pub fn view_label(view: &AppView, t: &Strings) -> &'static str {
    match view {
        AppView::Home => t.nav_home,
        AppView::Playlists => t.nav_playlists,
        AppView::PlaylistDetail(_) => t.nav_playlist,
        AppView::Settings => t.nav_settings,
    }
}
