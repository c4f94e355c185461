use crate::database::album::Album;
use crate::database::photo::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// --- Request Payloads ---

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub title: String,
    pub description: String,
}

// --- URL/Query Parameters ---

/// Sort order for photos within an album, on acquisition date.
#[derive(Serialize, Debug, Clone, Copy, Eq, PartialEq, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// Anything other than "asc" sorts descending, so query parsing never fails
// on the sort parameter.
impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        })
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSortParams {
    #[serde(default)]
    pub sort: SortOrder,
}

// --- Response Payloads ---

/// An album in the list view: row data plus photo count and cover photo.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub photo_count: i64,
    /// Most recently added photo, used as the album cover.
    pub cover: Option<Photo>,
}

/// Full details of an album including its photos.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDetailsResponse {
    #[serde(flatten)]
    pub album: Album,
    pub photos: Vec<Photo>,
}

/// Result of toggling an album's sharing state.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub is_public: bool,
    pub share_token: Option<String>,
    pub share_url: Option<String>,
}

/// The album owner as exposed on public albums.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub name: String,
    pub email: String,
}

/// A publicly shared album as returned for an unauthenticated share-link
/// visitor.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicAlbumResponse {
    #[serde(flatten)]
    pub album: Album,
    pub photos: Vec<Photo>,
    pub owner: OwnerSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct Query {
        #[serde(default)]
        sort: SortOrder,
    }

    #[test]
    fn sort_order_defaults_to_desc() {
        let q: Query = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(q.sort, SortOrder::Desc);
        let q: Query = serde_json::from_str(r#"{"sort":"asc"}"#).expect("deserialize");
        assert_eq!(q.sort, SortOrder::Asc);
    }

    #[test]
    fn unknown_sort_values_fall_back_to_desc() {
        let q: Query = serde_json::from_str(r#"{"sort":"sideways"}"#).expect("deserialize");
        assert_eq!(q.sort, SortOrder::Desc);
        let q: Query = serde_json::from_str(r#"{"sort":"ASC"}"#).expect("deserialize");
        assert_eq!(q.sort, SortOrder::Asc);
    }

    #[test]
    fn sort_order_maps_to_sql_keywords() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }
}
