pub mod apple;
pub mod spotify;
pub mod yandex;
pub mod youtube;

pub use apple::AppleAdapter;
pub use spotify::SpotifyAdapter;
pub use yandex::YandexAdapter;
pub use youtube::YouTubeAdapter;
