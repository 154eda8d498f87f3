use std::fmt;
use std::str::FromStr;

use super::provider::Provider;
use crate::services::error::LinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Track,
    Album,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Track => "track",
            EntityType::Album => "album",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(EntityType::Track),
            "album" => Ok(EntityType::Album),
            other => Err(LinkError::InvalidEntityType(other.to_string())),
        }
    }
}

/// A track or album as seen by one provider, normalized from that provider's
/// catalog response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub url: String,
    pub provider: Provider,
    pub entity_type: EntityType,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.provider.code(), self.artist, self.title)
    }
}
