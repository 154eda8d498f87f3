use crate::domain::provider::Provider;
use crate::infrastructure::api::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("No supported link found")]
    UnknownLink,
    #[error("Invalid composite key: {0:?}")]
    InvalidCompositeKey(String),
    #[error("Invalid provider: {0:?}")]
    InvalidProvider(String),
    #[error("Invalid entity type: {0:?}")]
    InvalidEntityType(String),
    #[error("Not found in {provider}")]
    EntityNotFound { provider: Provider },
    #[error("{provider} {operation} failed: {source}")]
    Provider {
        provider: Provider,
        operation: &'static str,
        #[source]
        source: ClientError,
    },
    #[error("Translation failed: {0}")]
    Translation(#[source] ClientError),
    #[error("Request was cancelled before it finished")]
    Cancelled,
}

impl LinkError {
    /// Maps a client failure into the taxonomy: a missing entity becomes
    /// `EntityNotFound`, everything else is wrapped with its context.
    pub fn from_client(provider: Provider, operation: &'static str, err: ClientError) -> Self {
        match err {
            ClientError::NotFound => LinkError::EntityNotFound { provider },
            source => LinkError::Provider {
                provider,
                operation,
                source,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LinkError::EntityNotFound { .. })
    }
}
