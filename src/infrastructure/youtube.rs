use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{ClientError, YouTubeApi, YouTubePlaylist, YouTubeVideo};

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct ResourceItem {
    id: String,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    id: SearchId,
    snippet: Snippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    video_id: Option<String>,
    playlist_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    title: String,
    #[serde(default)]
    description: String,
    /// Absent for deleted or private videos
    video_owner_channel_title: Option<String>,
    resource_id: ResourceId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

pub struct YouTubeClient {
    http: Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, ClientError> {
        let resp: ListResponse<T> = self
            .http
            .get(format!("{BASE_URL}/{resource}"))
            .query(&[("part", "snippet"), ("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.items)
    }

    async fn search(&self, query: &str, kind: &str) -> Result<SearchItem, ClientError> {
        tracing::debug!(query, kind, "youtube search");
        self.list::<SearchItem>("search", &[("type", kind), ("q", query), ("maxResults", "1")])
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NotFound)
    }
}

#[async_trait]
impl YouTubeApi for YouTubeClient {
    async fn video(&self, id: &str) -> Result<YouTubeVideo, ClientError> {
        let item = self
            .list::<ResourceItem>("videos", &[("id", id)])
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NotFound)?;
        Ok(YouTubeVideo {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            channel_title: item.snippet.channel_title,
        })
    }

    async fn playlist(&self, id: &str) -> Result<YouTubePlaylist, ClientError> {
        let item = self
            .list::<ResourceItem>("playlists", &[("id", id)])
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NotFound)?;
        Ok(YouTubePlaylist {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            channel_title: item.snippet.channel_title,
        })
    }

    async fn first_playlist_item(
        &self,
        playlist_id: &str,
    ) -> Result<Option<YouTubeVideo>, ClientError> {
        let items = self
            .list::<PlaylistItem>(
                "playlistItems",
                &[("playlistId", playlist_id), ("maxResults", "1")],
            )
            .await?;
        Ok(items.into_iter().next().and_then(|item| {
            let snippet = item.snippet;
            Some(YouTubeVideo {
                id: snippet.resource_id.video_id?,
                title: snippet.title,
                description: snippet.description,
                channel_title: snippet.video_owner_channel_title.unwrap_or_default(),
            })
        }))
    }

    async fn search_video(&self, query: &str) -> Result<YouTubeVideo, ClientError> {
        // Search snippets carry a truncated description, so the auto-generated
        // marker is only reliable on the full video resource.
        let hit = self.search(query, "video").await?;
        let video_id = hit.id.video_id.ok_or(ClientError::NotFound)?;
        self.video(&video_id).await
    }

    async fn search_playlist(&self, query: &str) -> Result<YouTubePlaylist, ClientError> {
        let hit = self.search(query, "playlist").await?;
        Ok(YouTubePlaylist {
            id: hit.id.playlist_id.ok_or(ClientError::NotFound)?,
            title: hit.snippet.title,
            description: hit.snippet.description,
            channel_title: hit.snippet.channel_title,
        })
    }
}
