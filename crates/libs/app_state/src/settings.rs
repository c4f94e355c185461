use crate::{ApiSettings, RawSettings, SecretSettings, StorageSettings, UploadSettings};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub secrets: SecretSettings,
}

impl From<RawSettings> for AppSettings {
    fn from(raw: RawSettings) -> Self {
        Self {
            api: raw.api,
            storage: raw.storage,
            upload: raw.upload,
            secrets: raw.secrets,
        }
    }
}

impl UploadSettings {
    #[must_use]
    pub const fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}
