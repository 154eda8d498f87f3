pub mod api;
pub mod apple;
pub mod spotify;
pub mod translator;
pub mod yandex;
pub mod youtube;
