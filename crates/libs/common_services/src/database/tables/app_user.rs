use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a user in the application.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub name: String,
}

/// A user record including the password hash. Never serialized.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub password: String,
}
