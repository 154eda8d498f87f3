use super::entity::EntityType;
use super::provider::{Provider, ProviderCatalog};
use crate::services::error::LinkError;

/// Result of classifying one input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub provider: Provider,
    pub entity_id: String,
    pub entity_type: EntityType,
}

impl ProviderCatalog {
    /// Returns the first provider/type whose pattern matches and whose id can be
    /// extracted. Providers are probed in catalog order, track before album.
    pub fn detect_link(&self, input: &str) -> Result<Link, LinkError> {
        for entry in self.entries() {
            for entity_type in [EntityType::Track, EntityType::Album] {
                if let Some(entity_id) = entry.extract_id(input, entity_type) {
                    tracing::debug!(
                        provider = entry.provider.code(),
                        %entity_type,
                        %entity_id,
                        "detected link"
                    );
                    return Ok(Link {
                        url: input.to_string(),
                        provider: entry.provider,
                        entity_id,
                        entity_type,
                    });
                }
            }
        }
        Err(LinkError::UnknownLink)
    }
}
