use async_trait::async_trait;

use super::error::LinkError;
use crate::domain::entity::Entity;
use crate::domain::provider::Provider;

/// Normalizes one provider's catalog into [`Entity`] values.
///
/// Every method either returns an entity or a [`LinkError`]; a missing
/// entity is always `LinkError::EntityNotFound`.
#[async_trait]
pub trait Adapter: Send + Sync {
    fn provider(&self) -> Provider;

    async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError>;
    async fn search_track(&self, artist: &str, title: &str) -> Result<Entity, LinkError>;
    async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError>;
    async fn search_album(&self, artist: &str, name: &str) -> Result<Entity, LinkError>;
}
