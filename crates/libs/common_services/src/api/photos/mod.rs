pub mod color;
pub mod error;
pub mod exif_date;
pub mod interfaces;
pub mod service;
