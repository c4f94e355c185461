use serde::Deserialize;

/// The settings file exactly as it appears on disk, before any processing.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub secrets: SecretSettings,
    pub constants: RawConstants,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    /// The externally reachable base URL, used when building share links.
    pub public_url: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Base URL of the object-storage HTTP API.
    pub endpoint: String,
    pub bucket: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
    pub max_files_per_upload: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt_secret: String,
    pub database_url: String,
    pub storage_service_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawConstants {
    pub auth: AuthConstants,
    pub database: DatabaseConstants,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConstants {
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConstants {
    pub album_id_length: usize,
    pub photo_id_length: usize,
    pub share_token_bytes: usize,
}
