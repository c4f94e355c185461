use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Metadata for an uploaded photo. The bytes themselves live in object
/// storage; `file_path` is the public URL of the stored object.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub album_id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub size_bytes: i64,
    pub acquisition_date: DateTime<Utc>,
    pub predominant_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A photo row joined with the owner of its containing album, used by the
/// delete authorization check.
#[derive(Debug, FromRow)]
pub struct PhotoWithOwner {
    pub id: String,
    pub album_id: String,
    pub file_name: String,
    pub owner_id: i32,
}
