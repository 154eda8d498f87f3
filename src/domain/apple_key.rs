//! Apple Music composite identifiers.
//!
//! Apple catalog ids are only meaningful inside a storefront, and the public
//! URL carries the storefront in its path. Wherever other providers pass a bare
//! id around, Apple passes `"<storefront>-<id>"` instead.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::services::error::LinkError;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-z]{2})-([0-9]+)$").unwrap());

static ALBUM_TRACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"music\.apple\.com/([a-z]{2})/album/(?:[^/?#\s]+/)?\d+/?\?(?:[^#\s]*&)?i=(\d+)")
        .unwrap()
});

static SONG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"music\.apple\.com/([a-z]{2})/song/(?:[^/?#\s]+/)?(\d+)").unwrap()
});

static ALBUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"music\.apple\.com/([a-z]{2})/album/(?:[^/?#\s]+/)?(\d+)/?(\?[^#\s]*)?").unwrap()
});

/// ISO 3166-1 alpha-2 codes, lowercase, sorted for binary search.
const ISO_3166_ALPHA2: [&str; 249] = [
    "ad", "ae", "af", "ag", "ai", "al", "am", "ao", "aq", "ar", "as", "at", "au", "aw", "ax",
    "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bl", "bm", "bn", "bo", "bq",
    "br", "bs", "bt", "bv", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck",
    "cl", "cm", "cn", "co", "cr", "cu", "cv", "cw", "cx", "cy", "cz", "de", "dj", "dk", "dm",
    "do", "dz", "ec", "ee", "eg", "eh", "er", "es", "et", "fi", "fj", "fk", "fm", "fo", "fr",
    "ga", "gb", "gd", "ge", "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp", "gq", "gr", "gs",
    "gt", "gu", "gw", "gy", "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il", "im", "in",
    "io", "iq", "ir", "is", "it", "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki", "km", "kn",
    "kp", "kr", "kw", "ky", "kz", "la", "lb", "lc", "li", "lk", "lr", "ls", "lt", "lu", "lv",
    "ly", "ma", "mc", "md", "me", "mf", "mg", "mh", "mk", "ml", "mm", "mn", "mo", "mp", "mq",
    "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz", "na", "nc", "ne", "nf", "ng", "ni",
    "nl", "no", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf", "pg", "ph", "pk", "pl", "pm",
    "pn", "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru", "rw", "sa", "sb", "sc",
    "sd", "se", "sg", "sh", "si", "sj", "sk", "sl", "sm", "sn", "so", "sr", "ss", "st", "sv",
    "sx", "sy", "sz", "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to", "tr",
    "tt", "tv", "tw", "tz", "ua", "ug", "um", "us", "uy", "uz", "va", "vc", "ve", "vg", "vi",
    "vn", "vu", "wf", "ws", "ye", "yt", "za", "zm", "zw",
];

pub fn is_valid_storefront(storefront: &str) -> bool {
    storefront.len() == 2
        && storefront.bytes().all(|b| b.is_ascii_lowercase())
        && ISO_3166_ALPHA2.binary_search(&storefront).is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeKey {
    pub storefront: String,
    pub id: String,
}

impl CompositeKey {
    pub fn new(storefront: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            storefront: storefront.into(),
            id: id.into(),
        }
    }

    /// No validation: a key is assumed valid once constructed.
    pub fn marshal(&self) -> String {
        format!("{}-{}", self.storefront, self.id)
    }

    /// Parses a previously marshaled key. The storefront is not checked
    /// against ISO 3166 here.
    pub fn unmarshal(s: &str) -> Result<Self, LinkError> {
        let caps = KEY_RE
            .captures(s)
            .ok_or_else(|| LinkError::InvalidCompositeKey(s.to_string()))?;
        Ok(Self::new(&caps[1], &caps[2]))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.storefront, self.id)
    }
}

fn validated(storefront: &str, id: &str) -> Option<CompositeKey> {
    if !is_valid_storefront(storefront) {
        tracing::debug!(storefront, "rejecting apple link with unknown storefront");
        return None;
    }
    Some(CompositeKey::new(storefront, id))
}

/// Track links come either as an album page with `?i=<track>` or as a song
/// page. The album form is tried first; the id is always the track's.
pub fn parse_from_track_url(url: &str) -> Option<CompositeKey> {
    let caps = ALBUM_TRACK_RE
        .captures(url)
        .or_else(|| SONG_RE.captures(url))?;
    validated(&caps[1], &caps[2])
}

pub fn parse_from_album_url(url: &str) -> Option<CompositeKey> {
    let caps = ALBUM_RE.captures(url)?;
    let has_track_param = caps
        .get(3)
        .map(|q| {
            q.as_str()
                .trim_start_matches('?')
                .split('&')
                .any(|pair| pair.starts_with("i="))
        })
        .unwrap_or(false);
    if has_track_param {
        return None;
    }
    validated(&caps[1], &caps[2])
}
