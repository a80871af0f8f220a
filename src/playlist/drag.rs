//! Drag-and-drop identities.
//!
//! The interaction layer only knows opaque tokens: the text form of a video id.
//! They are turned back into positions here, so the engine only ever sees
//! indices.

use crate::db::{Video, VideoId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DragToken(String);

impl DragToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<VideoId> for DragToken {
    fn from(id: VideoId) -> Self {
        Self(id.to_string())
    }
}

pub fn position_of_token(videos: &[Video], token: &str) -> Option<usize> {
    videos.iter().position(|v| v.id.to_string() == token)
}

/// Resolves a drop of `active` onto `over` into `(from, to)` positions.
pub fn resolve_drop(videos: &[Video], active: &str, over: &str) -> Option<(usize, usize)> {
    if active == over {
        return None;
    }
    let from = position_of_token(videos, active)?;
    let to = position_of_token(videos, over)?;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn videos(ids: &[i64]) -> Vec<Video> {
        ids.iter()
            .map(|&id| Video {
                id: VideoId(id),
                url: format!("https://example.com/{id}"),
                title: id.to_string(),
                custom_title: None,
                duration: None,
                last_watched: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn tokens_are_the_id_text() {
        assert_eq!(DragToken::from(VideoId(42)).as_str(), "42");
    }

    #[test]
    fn resolves_both_ends_by_linear_lookup() {
        let list = videos(&[10, 20, 30]);
        assert_eq!(resolve_drop(&list, "30", "10"), Some((2, 0)));
        assert_eq!(resolve_drop(&list, "10", "20"), Some((0, 1)));
    }

    #[test]
    fn unresolvable_or_identical_tokens_are_ignored() {
        let list = videos(&[10, 20]);
        assert_eq!(resolve_drop(&list, "10", "99"), None);
        assert_eq!(resolve_drop(&list, "abc", "20"), None);
        assert_eq!(resolve_drop(&list, "20", "20"), None);
    }
}
