use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{ClientError, YandexAlbum, YandexMusicApi, YandexTrack};

const BASE_URL: &str = "https://api.music.yandex.net";

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct SearchResult {
    tracks: Option<SearchPage<YandexTrack>>,
    albums: Option<SearchPage<YandexAlbum>>,
}

#[derive(Deserialize)]
struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

fn first<T>(items: Option<SearchPage<T>>) -> Result<T, ClientError> {
    items
        .and_then(|page| page.results.into_iter().next())
        .ok_or(ClientError::NotFound)
}

pub struct YandexMusicClient {
    http: Client,
    token: Option<String>,
}

impl YandexMusicClient {
    pub fn new(http: Client, token: Option<String>) -> Self {
        Self { http, token }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut req = self.http.get(format!("{BASE_URL}/{path}")).query(params);
        if let Some(token) = &self.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("OAuth {token}"));
        }
        let envelope: Envelope<T> = req.send().await?.error_for_status()?.json().await?;
        Ok(envelope.result)
    }

    async fn search(&self, query: &str, kind: &str) -> Result<SearchResult, ClientError> {
        tracing::debug!(query, kind, "yandex search");
        self.get(
            "search",
            &[("text", query), ("type", kind), ("page", "0"), ("nocorrect", "false")],
        )
        .await
    }
}

#[async_trait]
impl YandexMusicApi for YandexMusicClient {
    async fn track(&self, id: &str) -> Result<YandexTrack, ClientError> {
        let tracks: Vec<YandexTrack> = self.get(&format!("tracks/{id}"), &[]).await?;
        tracks.into_iter().next().ok_or(ClientError::NotFound)
    }

    async fn album(&self, id: &str) -> Result<YandexAlbum, ClientError> {
        self.get(&format!("albums/{id}"), &[]).await
    }

    async fn search_track(&self, query: &str) -> Result<YandexTrack, ClientError> {
        first(self.search(query, "track").await?.tracks)
    }

    async fn search_album(&self, query: &str) -> Result<YandexAlbum, ClientError> {
        first(self.search(query, "album").await?.albums)
    }
}
