//! Heuristics for turning YouTube titles into artist and title.
//!
//! YouTube has no structured metadata. "Topic" channels created by YouTube's
//! own ingestion carry the artist in the channel name; everything else has to
//! be split out of the free-form video title.

use std::sync::LazyLock;

use regex::Regex;

use crate::infrastructure::api::YouTubeVideo;

pub const AUTOGENERATED_MARKER: &str = "Auto-generated by YouTube";
pub const TOPIC_SUFFIX: &str = " - Topic";
pub const ALBUM_PREFIX: &str = "Album - ";

const SEPARATORS: [&str; 4] = [" - ", " – ", " — ", "|"];

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]|\([^)]*\)|\{[^}]*\}").unwrap());

pub fn is_autogenerated_video(video: &YouTubeVideo) -> bool {
    video.description.contains(AUTOGENERATED_MARKER)
}

/// Artist from a "Topic" channel name. `None` for ordinary uploads, whose
/// channel says nothing reliable about the artist.
pub fn extract_artist(video: &YouTubeVideo) -> Option<String> {
    if !is_autogenerated_video(video) {
        return None;
    }
    let channel = video.channel_title.trim();
    Some(
        channel
            .strip_suffix(TOPIC_SUFFIX)
            .unwrap_or(channel)
            .trim()
            .to_string(),
    )
}

/// Drops bracketed annotations and splits on the first known separator,
/// falling back to "first word is the artist".
pub fn clean_and_split_title(raw_title: &str) -> (String, String) {
    let cleaned = ANNOTATION_RE.replace_all(raw_title, "");
    let cleaned = cleaned.trim();

    for sep in SEPARATORS {
        if let Some((artist, entity)) = cleaned.split_once(sep) {
            return (artist.trim().to_string(), entity.trim().to_string());
        }
    }

    match cleaned.split_once(char::is_whitespace) {
        Some((artist, entity)) => (artist.to_string(), entity.trim().to_string()),
        None => (cleaned.to_string(), String::new()),
    }
}

/// Artist and title for a single video.
pub fn video_metadata(video: &YouTubeVideo) -> (String, String) {
    match extract_artist(video) {
        Some(artist) => (artist, video.title.trim().to_string()),
        None => clean_and_split_title(&video.title),
    }
}

pub fn strip_album_prefix(title: &str) -> &str {
    title.strip_prefix(ALBUM_PREFIX).unwrap_or(title).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, channel: &str, description: &str) -> YouTubeVideo {
        YouTubeVideo {
            id: "hbe3CQamF8k".into(),
            title: title.into(),
            description: description.into(),
            channel_title: channel.into(),
        }
    }

    #[test]
    fn splits_on_en_dash_and_drops_parentheses() {
        assert_eq!(
            clean_and_split_title("queen – bohemian rhapsody (official video)"),
            ("queen".to_string(), "bohemian rhapsody".to_string())
        );
    }

    #[test]
    fn splits_on_pipe_and_drops_brackets() {
        assert_eq!(
            clean_and_split_title("artist | title [official music video]"),
            ("artist".to_string(), "title".to_string())
        );
    }

    #[test]
    fn drops_braces() {
        assert_eq!(
            clean_and_split_title("Massive Attack - Angel {1998} [HD]"),
            ("Massive Attack".to_string(), "Angel".to_string())
        );
    }

    #[test]
    fn separator_list_order_wins_over_position() {
        assert_eq!(
            clean_and_split_title("a | b - c"),
            ("a | b".to_string(), "c".to_string())
        );
    }

    #[test]
    fn falls_back_to_first_word() {
        assert_eq!(
            clean_and_split_title("Portishead Roads (live)"),
            ("Portishead".to_string(), "Roads".to_string())
        );
    }

    #[test]
    fn single_word_has_empty_entity() {
        assert_eq!(
            clean_and_split_title("Teardrop"),
            ("Teardrop".to_string(), String::new())
        );
    }

    #[test]
    fn empty_title() {
        assert_eq!(clean_and_split_title("  "), (String::new(), String::new()));
    }

    #[test]
    fn autogenerated_detection() {
        let auto = video(
            "Angel",
            "Massive Attack - Topic",
            "Provided to YouTube by Virgin\n\nAngel · Massive Attack\n\nAuto-generated by YouTube.",
        );
        let upload = video("Massive Attack - Angel", "MassiveAttackVEVO", "Official video");

        assert!(is_autogenerated_video(&auto));
        assert!(!is_autogenerated_video(&upload));
        assert_eq!(extract_artist(&auto).as_deref(), Some("Massive Attack"));
        assert_eq!(extract_artist(&upload), None);
    }

    #[test]
    fn video_metadata_prefers_topic_channel() {
        let auto = video("Angel (Remastered 2019)", "Massive Attack - Topic", AUTOGENERATED_MARKER);
        assert_eq!(
            video_metadata(&auto),
            ("Massive Attack".to_string(), "Angel (Remastered 2019)".to_string())
        );

        let upload = video("Massive Attack - Angel (Official Video)", "MassiveAttackVEVO", "");
        assert_eq!(
            video_metadata(&upload),
            ("Massive Attack".to_string(), "Angel".to_string())
        );
    }

    #[test]
    fn album_prefix() {
        assert_eq!(strip_album_prefix("Album - Mezzanine"), "Mezzanine");
        assert_eq!(strip_album_prefix("Mezzanine"), "Mezzanine");
    }
}
