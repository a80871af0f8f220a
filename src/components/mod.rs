//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod dialogs;
mod icons;
mod navigation;
mod player;
mod playlist_sidebar;
mod sidebar;
mod toast;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use dialogs::*;
pub use icons::*;
pub use navigation::*;
pub use player::*;
pub use playlist_sidebar::*;
pub use sidebar::*;
pub use toast::*;
