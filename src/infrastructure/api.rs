//! Boundaries to the outside world: one trait per provider catalog plus the
//! translator. Adapters depend on these traits so tests can swap in the mocks
//! at the bottom of this file.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("http error: {0}")]
    Http(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("client is closed")]
    Closed,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(reqwest::StatusCode::NOT_FOUND) => ClientError::NotFound,
            Some(reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN) => {
                ClientError::Auth(e.to_string())
            }
            _ if e.is_decode() => ClientError::Decode(e.to_string()),
            _ => ClientError::Http(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

// Apple Music

/// A song or album resource from the Apple Music catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleResource {
    pub id: String,
    pub name: String,
    pub artist_name: String,
    pub url: String,
}

#[async_trait]
pub trait AppleMusicApi: Send + Sync {
    async fn song(&self, storefront: &str, id: &str) -> Result<AppleResource, ClientError>;
    async fn album(&self, storefront: &str, id: &str) -> Result<AppleResource, ClientError>;
    async fn search_song(&self, storefront: &str, term: &str)
    -> Result<AppleResource, ClientError>;
    async fn search_album(
        &self,
        storefront: &str,
        term: &str,
    ) -> Result<AppleResource, ClientError>;
}

// Spotify

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyItem {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
}

#[async_trait]
pub trait SpotifyApi: Send + Sync {
    async fn track(&self, id: &str) -> Result<SpotifyItem, ClientError>;
    async fn album(&self, id: &str) -> Result<SpotifyItem, ClientError>;
    async fn search_track(&self, artist: &str, title: &str) -> Result<SpotifyItem, ClientError>;
    async fn search_album(&self, artist: &str, name: &str) -> Result<SpotifyItem, ClientError>;
}

// Yandex Music

/// Yandex returns ids as numbers on some endpoints and strings on others.
/// Folded into one canonical string as soon as it is read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YandexId {
    Int(u64),
    Float(f64),
    Str(String),
}

impl fmt::Display for YandexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YandexId::Int(n) => write!(f, "{n}"),
            YandexId::Float(x) if x.fract() == 0.0 && *x >= 0.0 => write!(f, "{}", *x as u64),
            YandexId::Float(x) => write!(f, "{x}"),
            YandexId::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YandexArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YandexAlbum {
    pub id: YandexId,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<YandexArtist>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct YandexTrack {
    pub id: YandexId,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<YandexArtist>,
    #[serde(default)]
    pub albums: Vec<YandexAlbum>,
}

#[async_trait]
pub trait YandexMusicApi: Send + Sync {
    async fn track(&self, id: &str) -> Result<YandexTrack, ClientError>;
    async fn album(&self, id: &str) -> Result<YandexAlbum, ClientError>;
    /// Best match for a free-text query.
    async fn search_track(&self, query: &str) -> Result<YandexTrack, ClientError>;
    async fn search_album(&self, query: &str) -> Result<YandexAlbum, ClientError>;
}

// YouTube

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouTubeVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YouTubePlaylist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_title: String,
}

#[async_trait]
pub trait YouTubeApi: Send + Sync {
    async fn video(&self, id: &str) -> Result<YouTubeVideo, ClientError>;
    async fn playlist(&self, id: &str) -> Result<YouTubePlaylist, ClientError>;
    async fn first_playlist_item(
        &self,
        playlist_id: &str,
    ) -> Result<Option<YouTubeVideo>, ClientError>;
    async fn search_video(&self, query: &str) -> Result<YouTubeVideo, ClientError>;
    async fn search_playlist(&self, query: &str) -> Result<YouTubePlaylist, ClientError>;
}

// Translation

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate_en_to_ru(&self, text: &str) -> Result<String, ClientError>;

    /// Releases the backend. Called once at shutdown; later calls are no-ops.
    fn close(&self) -> Result<(), ClientError>;
}
