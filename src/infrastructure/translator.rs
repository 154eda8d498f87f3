use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::api::{ClientError, Translator};

const TRANSLATE_URL: &str = "https://translate.api.cloud.yandex.net/translate/v2/translate";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<&'a str>,
    texts: [&'a str; 1],
    source_language_code: &'static str,
    target_language_code: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

/// Yandex Cloud Translate client.
pub struct YandexTranslator {
    http: Client,
    api_key: String,
    folder_id: Option<String>,
    closed: AtomicBool,
}

impl YandexTranslator {
    pub fn new(http: Client, api_key: String, folder_id: Option<String>) -> Self {
        Self {
            http,
            api_key,
            folder_id,
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Translator for YandexTranslator {
    async fn translate_en_to_ru(&self, text: &str) -> Result<String, ClientError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(ClientError::Closed);
        }
        let body = TranslateRequest {
            folder_id: self.folder_id.as_deref(),
            texts: [text],
            source_language_code: "en",
            target_language_code: "ru",
        };
        let resp: TranslateResponse = self
            .http
            .post(TRANSLATE_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Api-Key {}", self.api_key),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        resp.translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| ClientError::Decode("empty translation response".into()))
    }

    fn close(&self) -> Result<(), ClientError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("translator already closed");
        } else {
            tracing::info!("translator closed");
        }
        Ok(())
    }
}

/// Used when no translation backend is configured: every name translates to
/// itself, so the translation stage never produces a match on its own.
#[derive(Debug, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate_en_to_ru(&self, text: &str) -> Result<String, ClientError> {
        Ok(text.to_string())
    }

    fn close(&self) -> Result<(), ClientError> {
        Ok(())
    }
}
