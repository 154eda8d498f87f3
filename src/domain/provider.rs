use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::apple_key;
use super::entity::EntityType;
use crate::services::error::LinkError;

/// One of the supported streaming services. The code is stable: it keys the
/// adapter registry and appears in anything persisted outside the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    AppleMusic,
    Spotify,
    Yandex,
    YouTube,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::AppleMusic,
        Provider::Spotify,
        Provider::Yandex,
        Provider::YouTube,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Provider::AppleMusic => "ap",
            Provider::Spotify => "sf",
            Provider::Yandex => "ya",
            Provider::YouTube => "yt",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Provider::AppleMusic => "Apple Music",
            Provider::Spotify => "Spotify",
            Provider::Yandex => "Yandex Music",
            Provider::YouTube => "YouTube",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = LinkError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| LinkError::InvalidProvider(code.to_string()))
    }
}

/// How the provider-native id is pulled out of a matching URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// The first capture group is the id.
    Capture,
    /// Storefront and numeric id are combined into an Apple composite key.
    AppleCompositeKey,
}

#[derive(Debug)]
pub struct ProviderEntry {
    pub provider: Provider,
    pub track_pattern: Regex,
    pub album_pattern: Regex,
    pub id_rule: IdRule,
}

impl ProviderEntry {
    fn new(
        provider: Provider,
        track_pattern: &str,
        album_pattern: &str,
        id_rule: IdRule,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            provider,
            track_pattern: Regex::new(track_pattern)?,
            album_pattern: Regex::new(album_pattern)?,
            id_rule,
        })
    }

    fn pattern(&self, entity_type: EntityType) -> &Regex {
        match entity_type {
            EntityType::Track => &self.track_pattern,
            EntityType::Album => &self.album_pattern,
        }
    }

    /// Returns the provider-native id when `input` is a link of the given type.
    pub fn extract_id(&self, input: &str, entity_type: EntityType) -> Option<String> {
        let caps = self.pattern(entity_type).captures(input)?;
        match self.id_rule {
            IdRule::Capture => caps.get(1).map(|m| m.as_str().to_string()),
            IdRule::AppleCompositeKey => {
                let key = match entity_type {
                    EntityType::Track => apple_key::parse_from_track_url(input),
                    EntityType::Album => apple_key::parse_from_album_url(input),
                }?;
                Some(key.marshal())
            }
        }
    }
}

/// Immutable list of providers in detection order. Built once at startup and
/// shared by reference.
#[derive(Debug)]
pub struct ProviderCatalog {
    entries: Vec<ProviderEntry>,
}

impl ProviderCatalog {
    pub fn new() -> Result<Self, regex::Error> {
        let entries = vec![
            ProviderEntry::new(
                Provider::AppleMusic,
                r"music\.apple\.com/[a-z]{2}/(?:album/(?:[^/?#\s]+/)?\d+/?\?(?:[^#\s]*&)?i=\d+|song/(?:[^/?#\s]+/)?\d+)",
                r"music\.apple\.com/[a-z]{2}/album/(?:[^/?#\s]+/)?\d+",
                IdRule::AppleCompositeKey,
            )?,
            ProviderEntry::new(
                Provider::Spotify,
                r"open\.spotify\.com/(?:intl-[a-z]{2}(?:-[a-z]{2})?/)?track/([A-Za-z0-9]{22})",
                r"open\.spotify\.com/(?:intl-[a-z]{2}(?:-[a-z]{2})?/)?album/([A-Za-z0-9]{22})",
                IdRule::Capture,
            )?,
            ProviderEntry::new(
                Provider::Yandex,
                r"music\.yandex\.(?:ru|com|by|kz|uz)/(?:album/\d+/)?track/(\d+)",
                r"music\.yandex\.(?:ru|com|by|kz|uz)/album/(\d+)/?(?:[?#\s]|$)",
                IdRule::Capture,
            )?,
            ProviderEntry::new(
                Provider::YouTube,
                r"(?:(?:www\.|m\.|music\.)?youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})",
                r"(?:www\.|m\.|music\.)?youtube\.com/playlist\?(?:[^#\s]*&)?list=([A-Za-z0-9_-]+)",
                IdRule::Capture,
            )?,
        ];
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.entries.iter().map(|e| e.provider)
    }

    pub fn get(&self, provider: Provider) -> Option<&ProviderEntry> {
        self.entries.iter().find(|e| e.provider == provider)
    }
}
