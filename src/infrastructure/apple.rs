use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{AppleMusicApi, AppleResource, ClientError};

const BASE_URL: &str = "https://api.music.apple.com/v1/catalog";

#[derive(Deserialize)]
struct DataResponse {
    #[serde(default)]
    data: Vec<Resource>,
}

#[derive(Deserialize)]
struct Resource {
    id: String,
    attributes: Attributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Attributes {
    name: String,
    artist_name: String,
    url: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: SearchResults,
}

#[derive(Deserialize)]
struct SearchResults {
    songs: Option<DataResponse>,
    albums: Option<DataResponse>,
}

impl DataResponse {
    fn first(self) -> Result<AppleResource, ClientError> {
        let resource = self.data.into_iter().next().ok_or(ClientError::NotFound)?;
        Ok(AppleResource {
            id: resource.id,
            name: resource.attributes.name,
            artist_name: resource.attributes.artist_name,
            url: resource.attributes.url,
        })
    }
}

/// Apple Music catalog client authenticated with a developer token.
pub struct AppleMusicClient {
    http: Client,
    developer_token: String,
}

impl AppleMusicClient {
    pub fn new(http: Client, developer_token: String) -> Self {
        Self {
            http,
            developer_token,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{BASE_URL}/{path}"))
            .bearer_auth(&self.developer_token)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    async fn search(
        &self,
        storefront: &str,
        term: &str,
        kind: &str,
    ) -> Result<SearchResults, ClientError> {
        tracing::debug!(storefront, term, kind, "apple music search");
        let resp: SearchResponse = self
            .get(
                &format!("{storefront}/search"),
                &[("term", term), ("types", kind), ("limit", "1")],
            )
            .await?;
        Ok(resp.results)
    }
}

#[async_trait]
impl AppleMusicApi for AppleMusicClient {
    async fn song(&self, storefront: &str, id: &str) -> Result<AppleResource, ClientError> {
        self.get::<DataResponse>(&format!("{storefront}/songs/{id}"), &[])
            .await?
            .first()
    }

    async fn album(&self, storefront: &str, id: &str) -> Result<AppleResource, ClientError> {
        self.get::<DataResponse>(&format!("{storefront}/albums/{id}"), &[])
            .await?
            .first()
    }

    async fn search_song(
        &self,
        storefront: &str,
        term: &str,
    ) -> Result<AppleResource, ClientError> {
        self.search(storefront, term, "songs")
            .await?
            .songs
            .ok_or(ClientError::NotFound)?
            .first()
    }

    async fn search_album(
        &self,
        storefront: &str,
        term: &str,
    ) -> Result<AppleResource, ClientError> {
        self.search(storefront, term, "albums")
            .await?
            .albums
            .ok_or(ClientError::NotFound)?
            .first()
    }
}
