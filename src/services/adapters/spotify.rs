use async_trait::async_trait;

use crate::domain::entity::{Entity, EntityType};
use crate::domain::provider::Provider;
use crate::infrastructure::api::{SpotifyApi, SpotifyItem};
use crate::services::adapter::Adapter;
use crate::services::error::LinkError;

const PROVIDER: Provider = Provider::Spotify;

pub struct SpotifyAdapter<C> {
    client: C,
}

impl<C: SpotifyApi> SpotifyAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    fn entity(item: SpotifyItem, entity_type: EntityType) -> Entity {
        let url = format!("https://open.spotify.com/{}/{}", entity_type.as_str(), item.id);
        Entity {
            artist: item.artists.into_iter().next().unwrap_or_default(),
            id: item.id,
            title: item.name,
            url,
            provider: PROVIDER,
            entity_type,
        }
    }
}

#[async_trait]
impl<C: SpotifyApi> Adapter for SpotifyAdapter<C> {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError> {
        let track = self
            .client
            .track(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch track", e))?;
        Ok(Self::entity(track, EntityType::Track))
    }

    async fn search_track(&self, artist: &str, title: &str) -> Result<Entity, LinkError> {
        let track = self
            .client
            .search_track(artist, title)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search track", e))?;
        Ok(Self::entity(track, EntityType::Track))
    }

    async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError> {
        let album = self
            .client
            .album(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch album", e))?;
        Ok(Self::entity(album, EntityType::Album))
    }

    async fn search_album(&self, artist: &str, name: &str) -> Result<Entity, LinkError> {
        let album = self
            .client
            .search_album(artist, name)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search album", e))?;
        Ok(Self::entity(album, EntityType::Album))
    }
}
