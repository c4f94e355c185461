use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One file taken from the multipart upload body.
#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Optional per-upload metadata sent alongside the files. Applies to every
/// file in the batch.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Explicit acquisition date; wins over EXIF and upload time.
    pub acquisition_date: Option<DateTime<Utc>>,
    /// Hex value or color name; unknown values fall back to extraction.
    pub predominant_color: Option<String>,
}
