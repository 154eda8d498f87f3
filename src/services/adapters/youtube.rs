use async_trait::async_trait;

use crate::domain::entity::{Entity, EntityType};
use crate::domain::provider::Provider;
use crate::infrastructure::api::{YouTubeApi, YouTubePlaylist, YouTubeVideo};
use crate::services::adapter::Adapter;
use crate::services::error::LinkError;
use crate::services::title_parser::{
    clean_and_split_title, extract_artist, strip_album_prefix, video_metadata,
};

const PROVIDER: Provider = Provider::YouTube;

pub struct YouTubeAdapter<C> {
    client: C,
}

fn video_entity(video: YouTubeVideo) -> Entity {
    let (artist, title) = video_metadata(&video);
    Entity {
        url: format!("https://www.youtube.com/watch?v={}", video.id),
        id: video.id,
        title,
        artist,
        provider: PROVIDER,
        entity_type: EntityType::Track,
    }
}

impl<C: YouTubeApi> YouTubeAdapter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Auto-generated album playlists only say who the artist is through
    /// their tracks, so the first item decides.
    async fn playlist_entity(
        &self,
        playlist: YouTubePlaylist,
        operation: &'static str,
    ) -> Result<Entity, LinkError> {
        let first_item = self
            .client
            .first_playlist_item(&playlist.id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, operation, e))?;

        let (artist, title) = match first_item.as_ref().and_then(extract_artist) {
            Some(artist) => (artist, strip_album_prefix(&playlist.title).to_string()),
            None => clean_and_split_title(&playlist.title),
        };

        Ok(Entity {
            url: format!("https://www.youtube.com/playlist?list={}", playlist.id),
            id: playlist.id,
            title,
            artist,
            provider: PROVIDER,
            entity_type: EntityType::Album,
        })
    }
}

#[async_trait]
impl<C: YouTubeApi> Adapter for YouTubeAdapter<C> {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn fetch_track(&self, id: &str) -> Result<Entity, LinkError> {
        let video = self
            .client
            .video(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch track", e))?;
        Ok(video_entity(video))
    }

    async fn search_track(&self, artist: &str, title: &str) -> Result<Entity, LinkError> {
        let video = self
            .client
            .search_video(&format!("{artist} - {title}"))
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search track", e))?;
        Ok(video_entity(video))
    }

    async fn fetch_album(&self, id: &str) -> Result<Entity, LinkError> {
        let playlist = self
            .client
            .playlist(id)
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "fetch album", e))?;
        self.playlist_entity(playlist, "fetch album").await
    }

    async fn search_album(&self, artist: &str, name: &str) -> Result<Entity, LinkError> {
        let playlist = self
            .client
            .search_playlist(&format!("{artist} - {name}"))
            .await
            .map_err(|e| LinkError::from_client(PROVIDER, "search album", e))?;
        self.playlist_entity(playlist, "search album").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api::mocks::MockYouTube;
    use crate::services::title_parser::AUTOGENERATED_MARKER;

    fn topic_video(id: &str, title: &str, artist: &str) -> YouTubeVideo {
        YouTubeVideo {
            id: id.into(),
            title: title.into(),
            description: format!("Provided to YouTube by Virgin\n\n{AUTOGENERATED_MARKER}."),
            channel_title: format!("{artist} - Topic"),
        }
    }

    #[tokio::test]
    async fn autogenerated_video_uses_channel_artist() {
        let mut client = MockYouTube::default();
        client.videos.insert(
            "hbe3CQamF8k".into(),
            topic_video("hbe3CQamF8k", "Angel", "Massive Attack"),
        );

        let entity = YouTubeAdapter::new(client)
            .fetch_track("hbe3CQamF8k")
            .await
            .unwrap();
        assert_eq!(entity.artist, "Massive Attack");
        assert_eq!(entity.title, "Angel");
        assert_eq!(entity.url, "https://www.youtube.com/watch?v=hbe3CQamF8k");
    }

    #[tokio::test]
    async fn uploaded_video_title_is_split() {
        let mut client = MockYouTube::default();
        client.video_searches.insert(
            "Massive Attack - Angel".into(),
            YouTubeVideo {
                id: "hbe3CQamF8k".into(),
                title: "Massive Attack - Angel (Official Video) [HD]".into(),
                description: "Official video".into(),
                channel_title: "MassiveAttackVEVO".into(),
            },
        );

        let entity = YouTubeAdapter::new(client)
            .search_track("Massive Attack", "Angel")
            .await
            .unwrap();
        assert_eq!(entity.artist, "Massive Attack");
        assert_eq!(entity.title, "Angel");
    }

    #[tokio::test]
    async fn autogenerated_album_takes_artist_from_first_item() {
        let mut client = MockYouTube::default();
        client.playlists.insert(
            "OLAK5uy_mezzanine".into(),
            YouTubePlaylist {
                id: "OLAK5uy_mezzanine".into(),
                title: "Album - Mezzanine".into(),
                description: String::new(),
                channel_title: "YouTube Music".into(),
            },
        );
        client.first_items.insert(
            "OLAK5uy_mezzanine".into(),
            topic_video("8xk2oZTs4mA", "Angel", "Massive Attack"),
        );

        let entity = YouTubeAdapter::new(client)
            .fetch_album("OLAK5uy_mezzanine")
            .await
            .unwrap();
        assert_eq!(entity.artist, "Massive Attack");
        assert_eq!(entity.title, "Mezzanine");
        assert_eq!(entity.entity_type, EntityType::Album);
        assert_eq!(
            entity.url,
            "https://www.youtube.com/playlist?list=OLAK5uy_mezzanine"
        );
    }

    #[tokio::test]
    async fn user_playlist_falls_back_to_title_split() {
        let mut client = MockYouTube::default();
        client.playlist_searches.insert(
            "Massive Attack - Mezzanine".into(),
            YouTubePlaylist {
                id: "PL123".into(),
                title: "Massive Attack - Mezzanine (Full Album)".into(),
                description: String::new(),
                channel_title: "someone".into(),
            },
        );

        let entity = YouTubeAdapter::new(client)
            .search_album("Massive Attack", "Mezzanine")
            .await
            .unwrap();
        assert_eq!(entity.artist, "Massive Attack");
        assert_eq!(entity.title, "Mezzanine");
    }

    #[tokio::test]
    async fn missing_video_is_not_found() {
        let err = YouTubeAdapter::new(MockYouTube::default())
            .fetch_track("nope")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
