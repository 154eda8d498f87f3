use std::env;
use std::time::Duration;

use crate::domain::apple_key::is_valid_storefront;

const DEFAULT_STOREFRONT: &str = "us";
const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Credentials for the optional Yandex Cloud translation backend.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: String,
    pub folder_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub youtube_api_key: String,
    pub apple_music_token: String,
    pub apple_storefront: String,
    pub yandex_music_token: Option<String>,
    pub translate: Option<TranslateConfig>,
    pub resolve_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let apple_storefront = match optional("APPLE_STOREFRONT") {
            Some(sf) if is_valid_storefront(&sf) => sf,
            Some(sf) => {
                return Err(ConfigError::Invalid {
                    key: "APPLE_STOREFRONT",
                    value: sf,
                });
            }
            None => DEFAULT_STOREFRONT.to_string(),
        };

        let resolve_timeout = match optional("RESOLVE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "RESOLVE_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_RESOLVE_TIMEOUT,
        };

        let translate = optional("YANDEX_TRANSLATE_API_KEY").map(|api_key| TranslateConfig {
            api_key,
            folder_id: optional("YANDEX_FOLDER_ID"),
        });

        Ok(Self {
            discord_token: required("DISCORD_TOKEN")?,
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            youtube_api_key: required("YOUTUBE_API_KEY")?,
            apple_music_token: required("APPLE_MUSIC_TOKEN")?,
            apple_storefront,
            yandex_music_token: optional("YANDEX_MUSIC_TOKEN"),
            translate,
            resolve_timeout,
        })
    }
}
