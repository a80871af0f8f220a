//! Utility helpers for ReelShelf

/// Format a duration in seconds as `m:ss`, or `h:mm:ss` past the hour.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.round() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Derive a readable title from a video URL.
/// Uses the last non-empty path segment (percent-decoded, extension dropped),
/// falling back to the host, then to the URL itself.
pub fn title_from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let without_query = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(without_scheme);

    let mut parts = without_query.split('/');
    let host = parts.next().unwrap_or_default();

    let segment = parts.filter(|s| !s.is_empty()).last().map(|segment| {
        let decoded = urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        match decoded.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => decoded,
        }
    });

    match segment {
        Some(title) if !title.trim().is_empty() => title,
        _ if !host.is_empty() => host.to_string(),
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.4), "1:05");
        assert_eq!(format_duration(3725.0), "1:02:05");
        assert_eq!(format_duration(f64::NAN), "0:00");
    }

    #[test]
    fn titles_come_from_the_last_segment() {
        assert_eq!(
            title_from_url("https://cdn.example.com/media/My%20Clip.mp4?t=3"),
            "My Clip"
        );
        assert_eq!(title_from_url("https://example.com/watch/"), "watch");
        assert_eq!(title_from_url("https://example.com"), "example.com");
    }
}
