use crate::{AppConstants, AppSettings, RawSettings};
use color_eyre::Result;
use std::path::Path;
use std::sync::LazyLock;

/// Loads the application settings from `config/settings.yaml`, letting
/// `APP__`-prefixed environment variables override individual keys
/// (e.g. `APP__SECRETS__DATABASE_URL`).
pub fn load_app_settings() -> Result<AppSettings> {
    // Load .env first so env overrides from it are picked up below.
    dotenv::from_path(".env").ok();
    load_settings_from_path(Path::new("config/settings.yaml"))
}

/// Loads settings from an explicit file path. Used by the integration suite
/// to point at a per-run settings file.
pub fn load_settings_from_path(path: &Path) -> Result<AppSettings> {
    let raw = load_raw(path)?;
    Ok(raw.into())
}

fn load_raw(path: &Path) -> Result<RawSettings> {
    let config_path = path.canonicalize()?;
    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    Ok(builder.build()?.try_deserialize::<RawSettings>()?)
}

fn load_app_constants() -> Result<AppConstants> {
    let raw = load_raw(Path::new("config/settings.yaml"))?;
    Ok(raw.into())
}

pub static CONSTANTS: LazyLock<AppConstants> =
    LazyLock::new(|| load_app_constants().expect("Cannot load app constants."));

#[must_use]
pub fn constants() -> &'static AppConstants {
    &CONSTANTS
}
