pub mod album_store;
pub mod photo_store;
pub mod user_store;

pub use album_store::AlbumStore;
pub use photo_store::PhotoStore;
pub use user_store::UserStore;
