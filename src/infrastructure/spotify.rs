use async_trait::async_trait;
use rspotify::model::{AlbumId, FullTrack, SearchResult, SearchType, SimplifiedAlbum, TrackId};
use rspotify::{ClientCredsSpotify, ClientError as SpotifyError, Credentials, prelude::*};

use super::api::{ClientError, SpotifyApi, SpotifyItem};

pub struct SpotifyClient {
    client: ClientCredsSpotify,
}

fn map_error(err: SpotifyError) -> ClientError {
    match err {
        SpotifyError::Http(http) => match *http {
            // Spotify answers malformed ids with 400 and unknown ids with 404.
            rspotify::http::HttpError::StatusCode(ref resp)
                if matches!(resp.status().as_u16(), 400 | 404) =>
            {
                ClientError::NotFound
            }
            rspotify::http::HttpError::StatusCode(ref resp)
                if matches!(resp.status().as_u16(), 401 | 403) =>
            {
                ClientError::Auth(format!("status {}", resp.status()))
            }
            other => ClientError::Http(other.to_string()),
        },
        SpotifyError::ParseJson(e) => ClientError::Decode(e.to_string()),
        other => ClientError::Http(other.to_string()),
    }
}

fn artist_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(str::to_string).collect()
}

fn track_item(track: FullTrack) -> Result<SpotifyItem, ClientError> {
    let id = track.id.as_ref().ok_or(ClientError::NotFound)?.id().to_string();
    Ok(SpotifyItem {
        id,
        artists: artist_names(track.artists.iter().map(|a| a.name.as_str())),
        name: track.name,
    })
}

fn album_item(album: SimplifiedAlbum) -> Result<SpotifyItem, ClientError> {
    let id = album.id.as_ref().ok_or(ClientError::NotFound)?.id().to_string();
    Ok(SpotifyItem {
        id,
        artists: artist_names(album.artists.iter().map(|a| a.name.as_str())),
        name: album.name,
    })
}

impl SpotifyClient {
    pub async fn new(client_id: &str, client_secret: &str) -> Result<Self, ClientError> {
        let creds = Credentials::new(client_id, client_secret);
        let client = ClientCredsSpotify::new(creds);
        client
            .request_token()
            .await
            .map_err(|e| ClientError::Auth(e.to_string()))?;
        Ok(Self { client })
    }

    async fn search(&self, query: &str, kind: SearchType) -> Result<SearchResult, ClientError> {
        tracing::debug!(query, "spotify search");
        self.client
            .search(query, kind, None, None, Some(1), None)
            .await
            .map_err(map_error)
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn track(&self, id: &str) -> Result<SpotifyItem, ClientError> {
        let track_id = TrackId::from_id(id).map_err(|_| ClientError::NotFound)?;
        let track = self.client.track(track_id, None).await.map_err(map_error)?;
        track_item(track)
    }

    async fn album(&self, id: &str) -> Result<SpotifyItem, ClientError> {
        let album_id = AlbumId::from_id(id).map_err(|_| ClientError::NotFound)?;
        let album = self.client.album(album_id, None).await.map_err(map_error)?;
        Ok(SpotifyItem {
            id: album.id.id().to_string(),
            artists: artist_names(album.artists.iter().map(|a| a.name.as_str())),
            name: album.name,
        })
    }

    async fn search_track(&self, artist: &str, title: &str) -> Result<SpotifyItem, ClientError> {
        let query = format!("artist:{artist} track:{title}");
        match self.search(&query, SearchType::Track).await? {
            SearchResult::Tracks(page) => page
                .items
                .into_iter()
                .next()
                .ok_or(ClientError::NotFound)
                .and_then(track_item),
            _ => Err(ClientError::Decode("unexpected search result kind".into())),
        }
    }

    async fn search_album(&self, artist: &str, name: &str) -> Result<SpotifyItem, ClientError> {
        let query = format!("artist:{artist} album:{name}");
        match self.search(&query, SearchType::Album).await? {
            SearchResult::Albums(page) => page
                .items
                .into_iter()
                .next()
                .ok_or(ClientError::NotFound)
                .and_then(album_item),
            _ => Err(ClientError::Decode("unexpected search result kind".into())),
        }
    }
}
