use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use super::error::LinkError;
use super::registry::Registry;
use crate::domain::entity::Entity;
use crate::domain::link::Link;
use crate::domain::provider::{Provider, ProviderCatalog};

#[derive(Debug)]
pub enum TargetOutcome {
    Found(Entity),
    NotFound,
    Failed(LinkError),
}

#[derive(Debug)]
pub struct Conversion {
    pub source: Entity,
    /// One entry per other registered provider, in catalog order.
    pub targets: Vec<(Provider, TargetOutcome)>,
}

/// Resolves a detected link into the equivalent entity on every other
/// provider. Stateless: every call fetches and searches afresh.
pub struct ConvertService {
    catalog: Arc<ProviderCatalog>,
    registry: Arc<Registry>,
    timeout: Duration,
}

impl ConvertService {
    pub fn new(catalog: Arc<ProviderCatalog>, registry: Arc<Registry>, timeout: Duration) -> Self {
        Self {
            catalog,
            registry,
            timeout,
        }
    }

    pub fn detect(&self, input: &str) -> Result<Link, LinkError> {
        self.catalog.detect_link(input)
    }

    /// Runs the whole conversion under the configured deadline. Expiry drops
    /// every in-flight request and reports [`LinkError::Cancelled`].
    pub async fn convert(&self, link: &Link) -> Result<Conversion, LinkError> {
        tokio::time::timeout(self.timeout, self.convert_unbounded(link))
            .await
            .map_err(|_| {
                tracing::warn!(url = %link.url, "conversion timed out");
                LinkError::Cancelled
            })?
    }

    async fn convert_unbounded(&self, link: &Link) -> Result<Conversion, LinkError> {
        let source = self
            .registry
            .fetch(link.provider, link.entity_type, &link.entity_id)
            .await?;
        tracing::info!(%source, "resolved source entity");

        let targets: Vec<Provider> = self
            .catalog
            .providers()
            .filter(|p| *p != source.provider && self.registry.contains(*p))
            .collect();

        let searches = targets.iter().map(|&provider| {
            let source = &source;
            async move {
                let outcome = match self
                    .registry
                    .search(provider, source.entity_type, &source.artist, &source.title)
                    .await
                {
                    Ok(entity) => TargetOutcome::Found(entity),
                    Err(err) if err.is_not_found() => TargetOutcome::NotFound,
                    Err(err) => {
                        tracing::warn!(provider = provider.code(), "search failed: {err}");
                        TargetOutcome::Failed(err)
                    }
                };
                (provider, outcome)
            }
        });
        let targets = join_all(searches).await;

        Ok(Conversion { source, targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::EntityType;
    use crate::infrastructure::api::mocks::{MockSpotify, MockTranslator, MockYandex};
    use crate::infrastructure::api::{SpotifyItem, YandexArtist, YandexId, YandexTrack};
    use crate::services::adapters::{SpotifyAdapter, YandexAdapter};
    use crate::services::matcher::CrossScriptMatcher;

    const ANGEL_URL: &str = "https://open.spotify.com/track/7uv632EkfwYhXoqf8rhYrg";

    fn spotify() -> MockSpotify {
        let mut client = MockSpotify::default();
        client.tracks.insert(
            "7uv632EkfwYhXoqf8rhYrg".into(),
            SpotifyItem {
                id: "7uv632EkfwYhXoqf8rhYrg".into(),
                name: "Angel".into(),
                artists: vec!["Massive Attack".into()],
            },
        );
        client
    }

    fn yandex_candidate(artist: &str) -> YandexTrack {
        YandexTrack {
            id: YandexId::Int(1710811),
            title: "Angel".into(),
            artists: vec![YandexArtist {
                name: artist.into(),
            }],
            albums: vec![],
        }
    }

    fn service(yandex: MockYandex) -> ConvertService {
        let matcher = CrossScriptMatcher::new(Arc::new(MockTranslator::default()));
        let registry = Registry::new()
            .with(Arc::new(SpotifyAdapter::new(spotify())))
            .with(Arc::new(YandexAdapter::new(yandex, matcher)));
        ConvertService::new(
            Arc::new(ProviderCatalog::new().unwrap()),
            Arc::new(registry),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn spotify_track_resolves_on_yandex() {
        let mut yandex = MockYandex::default();
        yandex
            .track_searches
            .insert("Massive Attack Angel".into(), yandex_candidate("Massive Attack"));
        let service = service(yandex);

        let link = service.detect(ANGEL_URL).unwrap();
        assert_eq!(link.entity_type, EntityType::Track);
        let conversion = service.convert(&link).await.unwrap();

        assert_eq!(conversion.source.title, "Angel");
        assert_eq!(conversion.targets.len(), 1);
        match &conversion.targets[0] {
            (Provider::Yandex, TargetOutcome::Found(entity)) => {
                assert_eq!(entity.provider.code(), "ya");
                assert_eq!(entity.id, "1710811");
            }
            other => panic!("unexpected target: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unrelated_artist_ends_as_not_found() {
        let mut yandex = MockYandex::default();
        yandex
            .track_searches
            .insert("Massive Attack Angel".into(), yandex_candidate("Angel Haze"));
        let service = service(yandex);

        let link = service.detect(ANGEL_URL).unwrap();
        let conversion = service.convert(&link).await.unwrap();
        assert!(matches!(
            conversion.targets.as_slice(),
            [(Provider::Yandex, TargetOutcome::NotFound)]
        ));
    }

    #[tokio::test]
    async fn missing_source_is_an_error() {
        let service = service(MockYandex::default());
        let link = service
            .detect("https://open.spotify.com/track/0000000000000000000000")
            .unwrap();
        let err = service.convert(&link).await.unwrap_err();
        assert!(matches!(
            err,
            LinkError::EntityNotFound {
                provider: Provider::Spotify
            }
        ));
    }

    #[tokio::test]
    async fn deadline_reports_cancelled() {
        struct Stalled;

        #[async_trait::async_trait]
        impl crate::services::adapter::Adapter for Stalled {
            fn provider(&self) -> Provider {
                Provider::YouTube
            }
            async fn fetch_track(&self, _id: &str) -> Result<Entity, LinkError> {
                futures::future::pending().await
            }
            async fn search_track(&self, _a: &str, _t: &str) -> Result<Entity, LinkError> {
                futures::future::pending().await
            }
            async fn fetch_album(&self, _id: &str) -> Result<Entity, LinkError> {
                futures::future::pending().await
            }
            async fn search_album(&self, _a: &str, _n: &str) -> Result<Entity, LinkError> {
                futures::future::pending().await
            }
        }

        let service = ConvertService::new(
            Arc::new(ProviderCatalog::new().unwrap()),
            Arc::new(Registry::new().with(Arc::new(Stalled))),
            Duration::from_millis(50),
        );
        let link = service.detect("https://youtu.be/hbe3CQamF8k").unwrap();
        assert!(matches!(
            service.convert(&link).await,
            Err(LinkError::Cancelled)
        ));
    }
}
