//! Playlist reconciliation: ordered edits to one playlist, persisted first,
//! then reflected in the shared playback pointer.

mod drag;
mod engine;
mod reconcile;

pub use drag::DragToken;
pub use engine::{EngineError, Notice, PlayCallback, PlaylistEngine};
