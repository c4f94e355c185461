use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried in the JWT access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthClaims {
    /// User ID.
    pub sub: i32,
    /// Expiration time as a Unix timestamp.
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry as a Unix timestamp.
    pub expiry: u64,
}
