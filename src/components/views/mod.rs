mod home;
mod playlist_detail;
mod playlists;
mod settings;

pub use home::HomeView;
pub use playlist_detail::PlaylistDetailView;
pub use playlists::PlaylistsView;
pub use settings::SettingsView;
