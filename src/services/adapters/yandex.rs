use async_trait::async_trait;

use crate::domain::entity::{Entity, EntityType};
use crate::domain::provider::Provider;
use crate::infrastructure::api::{
    ClientError, YandexAlbum, YandexArtist, YandexMusicApi, YandexTrack,
};
use crate::services::adapter::Adapter;
use crate::services::error::LinkError;
use crate::services::matcher::{CrossScriptMatcher, alternate_script_query};

const PROVIDER: Provider = Provider::Yandex;
const BASE_URL: &str = "https://music.yandex.ru";

/// Yandex search is lenient and indexes many artists in Cyrillic, so every
/// search candidate goes through the cross-script matcher and a rejected or
/// empty first search is retried once in the other script.
pub struct YandexAdapter<C> {
    client: C,
    matcher: CrossScriptMatcher,
}

fn primary_artist(artists: &[YandexArtist]) -> String {
    artists.first().map(|a| a.name.clone()).unwrap_or_default()
}

fn track_entity(track: YandexTrack) -> Entity {
    let id = track.id.to_string();
    let url = match track.albums.first() {
        Some(album) => format!("{BASE_URL}/album/{}/track/{id}", album.id),
        None => format!("{BASE_URL}/track/{id}"),
    };
    Entity {
        artist: primary_artist(&track.artists),
        id,
        title: track.title,
        url,
        provider: PROVIDER,
        entity_type: EntityType::Track,
    }
}

fn album_entity(album: YandexAlbum) -> Entity {
    let id = album.id.to_string();
    Entity {
        artist: primary_artist(&album.artists),
        url: format!("{BASE_URL}/album/{id}"),
        id,
        title: album.title,
        provider: PROVIDER,
        entity_type: EntityType::Album,
    }
}

impl<C: YandexMusicApi> YandexAdapter<C> {
    pub fn new(client: C, matcher: CrossScriptMatcher) -> Self {
        Self { client, matcher }
    }

    async fn is_requested_artist(
        &self,
        requested: &str,
        artists: &[YandexArtist],
    ) -> Result<bool, LinkError> {
        for artist in artists {
            if self.matcher.is_same_artist(requested, &artist.name).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn retry_query(query: &str) -> Result<String, LinkError> {
        alternate_script_query(query).ok_or(LinkError::EntityNotFound { provider: PROVIDER })
    }
}

/// A missing first-attempt result is not an error: it falls through to the
/// retry.
fn candidate<T>(
    result: Result<T, ClientError>,
    operation: &'static str,
) -> Result<Option<T>, LinkError> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(ClientError::NotFound) => Ok(None),
        Err(e) => Err(LinkError::from_client(PROVIDER, operation, e)),
    }
}

#[async_trait]
impl<C: YandexMusicApi> Adapter for YandexAdapter<C> {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError> {
        let track = self
            .client
            .track(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch track", e))?;
        Ok(track_entity(track))
    }

    async fn search_track(&self, artist: &str, title: &str) -> Result<Entity, LinkError> {
        let query = format!("{artist} {title}");
        let first = candidate(self.client.search_track(&query).await, "search track")?;
        if let Some(track) = first {
            if self.is_requested_artist(artist, &track.artists).await? {
                return Ok(track_entity(track));
            }
            tracing::warn!(
                provider = PROVIDER.code(),
                %query,
                candidate = %primary_artist(&track.artists),
                "rejected track candidate"
            );
        }

        let retry = Self::retry_query(&query)?;
        tracing::debug!(provider = PROVIDER.code(), query = %retry, "retrying track search");
        let track = self
            .client
            .search_track(&retry)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search track", e))?;
        Ok(track_entity(track))
    }

    async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError> {
        let album = self
            .client
            .album(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch album", e))?;
        Ok(album_entity(album))
    }

    async fn search_album(&self, artist: &str, name: &str) -> Result<Entity, LinkError> {
        let query = format!("{artist} {name}");
        let first = candidate(self.client.search_album(&query).await, "search album")?;
        if let Some(album) = first {
            if self.is_requested_artist(artist, &album.artists).await? {
                return Ok(album_entity(album));
            }
            tracing::warn!(
                provider = PROVIDER.code(),
                %query,
                candidate = %primary_artist(&album.artists),
                "rejected album candidate"
            );
        }

        let retry = Self::retry_query(&query)?;
        tracing::debug!(provider = PROVIDER.code(), query = %retry, "retrying album search");
        let album = self
            .client
            .search_album(&retry)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search album", e))?;
        Ok(album_entity(album))
    }
}
