use async_trait::async_trait;

use crate::domain::apple_key::CompositeKey;
use crate::domain::entity::{Entity, EntityType};
use crate::domain::provider::Provider;
use crate::infrastructure::api::{AppleMusicApi, AppleResource};
use crate::services::adapter::Adapter;
use crate::services::error::LinkError;

const PROVIDER: Provider = Provider::AppleMusic;

/// Entity ids are composite keys; searches run in one configured storefront.
pub struct AppleAdapter<C> {
    client: C,
    storefront: String,
}

impl<C: AppleMusicApi> AppleAdapter<C> {
    pub fn new(client: C, storefront: impl Into<String>) -> Self {
        Self {
            client,
            storefront: storefront.into(),
        }
    }

    fn entity(storefront: &str, resource: AppleResource, entity_type: EntityType) -> Entity {
        Entity {
            id: CompositeKey::new(storefront, resource.id).marshal(),
            title: resource.name,
            artist: resource.artist_name,
            url: resource.url,
            provider: PROVIDER,
            entity_type,
        }
    }
}

#[async_trait]
impl<C: AppleMusicApi> Adapter for AppleAdapter<C> {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError> {
        let key = CompositeKey::unmarshal(id)?;
        let song = self
            .client
            .song(&key.storefront, &key.id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch track", e))?;
        Ok(Self::entity(&key.storefront, song, EntityType::Track))
    }

    async fn search_track(&self, artist: &str, title: &str) -> Result<Entity, LinkError> {
        let term = format!("{artist} {title}");
        tracing::debug!(provider = PROVIDER.code(), %term, "searching track");
        let song = self
            .client
            .search_song(&self.storefront, &term)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search track", e))?;
        Ok(Self::entity(&self.storefront, song, EntityType::Track))
    }

    async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError> {
        let key = CompositeKey::unmarshal(id)?;
        let album = self
            .client
            .album(&key.storefront, &key.id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch album", e))?;
        Ok(Self::entity(&key.storefront, album, EntityType::Album))
    }

    async fn search_album(&self, artist: &str, name: &str) -> Result<Entity, LinkError> {
        let term = format!("{artist} {name}");
        tracing::debug!(provider = PROVIDER.code(), %term, "searching album");
        let album = self
            .client
            .search_album(&self.storefront, &term)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search album", e))?;
        Ok(Self::entity(&self.storefront, album, EntityType::Album))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api::mocks::MockApple;

    fn angel() -> AppleResource {
        AppleResource {
            id: "1440776543".into(),
            name: "Angel".into(),
            artist_name: "Massive Attack".into(),
            url: "https://music.apple.com/gb/album/angel/1440776536?i=1440776543".into(),
        }
    }

    #[tokio::test]
    async fn fetch_track_uses_composite_key() {
        let mut client = MockApple::default();
        client.songs.insert("gb-1440776543".into(), angel());
        let adapter = AppleAdapter::new(client, "us");

        let entity = adapter.fetch_track("gb-1440776543").await.unwrap();
        assert_eq!(entity.id, "gb-1440776543");
        assert_eq!(entity.artist, "Massive Attack");
        assert_eq!(entity.provider.code(), "ap");
        assert_eq!(entity.entity_type, EntityType::Track);
    }

    #[tokio::test]
    async fn fetch_rejects_malformed_ids() {
        let adapter = AppleAdapter::new(MockApple::default(), "us");
        let err = adapter.fetch_album("1440776536").await.unwrap_err();
        assert!(matches!(err, LinkError::InvalidCompositeKey(ref s) if s == "1440776536"));
    }

    #[tokio::test]
    async fn search_keys_results_with_search_storefront() {
        let mut client = MockApple::default();
        client
            .song_searches
            .insert("us:Massive Attack Angel".into(), angel());
        let adapter = AppleAdapter::new(client, "us");

        let entity = adapter.search_track("Massive Attack", "Angel").await.unwrap();
        assert_eq!(entity.id, "us-1440776543");
    }

    #[tokio::test]
    async fn missing_album_is_not_found() {
        let adapter = AppleAdapter::new(MockApple::default(), "us");
        let err = adapter.fetch_album("us-1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
