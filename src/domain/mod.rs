pub mod apple_key;
pub mod entity;
pub mod link;
pub mod provider;
