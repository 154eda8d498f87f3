use std::collections::HashMap;
use std::sync::Arc;

use super::adapter::Adapter;
use super::error::LinkError;
use crate::domain::entity::{Entity, EntityType};
use crate::domain::provider::Provider;

/// Dispatches fetch/search calls to the adapter registered for a provider
/// code. Read-only once built; no retries and no caching.
#[derive(Default)]
pub struct Registry {
    adapters: HashMap<&'static str, Arc<dyn Adapter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its provider's code, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn Adapter>) {
        self.adapters.insert(adapter.provider().code(), adapter);
    }

    pub fn with(mut self, adapter: Arc<dyn Adapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.adapters.contains_key(provider.code())
    }

    fn adapter(&self, provider: Provider) -> Result<&dyn Adapter, LinkError> {
        self.adapters
            .get(provider.code())
            .map(|a| a.as_ref())
            .ok_or_else(|| LinkError::InvalidProvider(provider.code().to_string()))
    }

    pub async fn fetch(
        &self,
        provider: Provider,
        entity_type: EntityType,
        id: &str,
    ) -> Result<Entity, LinkError> {
        let adapter = self.adapter(provider)?;
        tracing::debug!(provider = provider.code(), %entity_type, id, "fetch");
        match entity_type {
            EntityType::Track => adapter.fetch_track(id).await,
            EntityType::Album => adapter.fetch_album(id).await,
        }
    }

    pub async fn search(
        &self,
        provider: Provider,
        entity_type: EntityType,
        artist: &str,
        name: &str,
    ) -> Result<Entity, LinkError> {
        let adapter = self.adapter(provider)?;
        tracing::debug!(provider = provider.code(), %entity_type, artist, name, "search");
        match entity_type {
            EntityType::Track => adapter.search_track(artist, name).await,
            EntityType::Album => adapter.search_album(artist, name).await,
        }
    }

    /// Same as [`Registry::fetch`] for a provider code and entity type that
    /// arrive as text, e.g. from a button payload.
    pub async fn fetch_by_code(
        &self,
        code: &str,
        entity_type: &str,
        id: &str,
    ) -> Result<Entity, LinkError> {
        let provider: Provider = code.parse()?;
        let entity_type: EntityType = entity_type.parse()?;
        self.fetch(provider, entity_type, id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct StubAdapter(Provider);

    impl StubAdapter {
        fn entity(&self, id: &str, title: &str, entity_type: EntityType) -> Entity {
            Entity {
                id: id.into(),
                title: title.into(),
                artist: "stub".into(),
                url: String::new(),
                provider: self.0,
                entity_type,
            }
        }
    }

    #[async_trait]
    impl Adapter for StubAdapter {
        fn provider(&self) -> Provider {
            self.0
        }

        async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError> {
            Ok(self.entity(id, "fetched track", EntityType::Track))
        }

        async fn search_track(&self, _artist: &str, title: &str) -> Result<Entity, LinkError> {
            Ok(self.entity("1", title, EntityType::Track))
        }

        async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError> {
            Ok(self.entity(id, "fetched album", EntityType::Album))
        }

        async fn search_album(&self, _artist: &str, _name: &str) -> Result<Entity, LinkError> {
            Err(LinkError::EntityNotFound { provider: self.0 })
        }
    }

    fn registry() -> Registry {
        Registry::new()
            .with(Arc::new(StubAdapter(Provider::Spotify)))
            .with(Arc::new(StubAdapter(Provider::Yandex)))
    }

    #[tokio::test]
    async fn dispatches_by_provider_and_type() {
        let registry = registry();

        let track = registry
            .fetch(Provider::Spotify, EntityType::Track, "abc")
            .await
            .unwrap();
        assert_eq!(track.title, "fetched track");
        assert_eq!(track.provider, Provider::Spotify);

        let album = registry
            .fetch(Provider::Yandex, EntityType::Album, "42")
            .await
            .unwrap();
        assert_eq!(album.title, "fetched album");
        assert_eq!(album.provider, Provider::Yandex);
    }

    #[tokio::test]
    async fn adapter_errors_pass_through() {
        let err = registry()
            .search(Provider::Yandex, EntityType::Album, "a", "b")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unregistered_provider_is_invalid() {
        let err = registry()
            .search(Provider::AppleMusic, EntityType::Track, "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::InvalidProvider(ref c) if c == "ap"));
        assert!(!registry().contains(Provider::AppleMusic));
    }

    #[tokio::test]
    async fn textual_dispatch_validates_inputs() {
        let registry = registry();

        let entity = registry.fetch_by_code("sf", "album", "x").await.unwrap();
        assert_eq!(entity.entity_type, EntityType::Album);

        assert!(matches!(
            registry.fetch_by_code("zz", "track", "x").await,
            Err(LinkError::InvalidProvider(_))
        ));
        assert!(matches!(
            registry.fetch_by_code("sf", "artist", "x").await,
            Err(LinkError::InvalidEntityType(ref t)) if t == "artist"
        ));
    }
}
