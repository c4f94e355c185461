use crate::{AuthConstants, DatabaseConstants, RawSettings};
use serde::Deserialize;

/// Values that never change at runtime and are shared across binaries.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConstants {
    pub auth: AuthConstants,
    pub database: DatabaseConstants,
}

impl From<RawSettings> for AppConstants {
    fn from(raw: RawSettings) -> Self {
        Self {
            auth: raw.constants.auth,
            database: raw.constants.database,
        }
    }
}
