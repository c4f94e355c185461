pub mod album;
pub mod auth;
pub mod photos;
