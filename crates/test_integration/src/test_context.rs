use crate::utils::{create_test_database, create_test_settings};
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::Result;
use common_services::utils::nice_id;
use sqlx::{Executor, PgPool};
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The main context for the integration tests: a dedicated database, a
/// running API server and an HTTP client pointed at it.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: reqwest::Client,
    // Private fields for cleanup on Drop
    _db_name: String,
    _management_pool: PgPool,
    _api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = Path::new("crates/test_integration/assets/settings.yaml");
        let base_settings = load_settings_from_path(settings_path)?;
        let database_name = format!("test_{}", nice_id(8));

        let (main_pool, management_pool) =
            create_test_database(&base_settings.secrets.database_url, &database_name).await?;

        let settings = create_test_settings(&base_settings, &database_name)?;

        let api_pool = main_pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        info!("Waiting for the API to start...");
        tokio::time::sleep(Duration::from_secs(2)).await;
        info!("Test environment is ready.");

        Ok(Self {
            pool: main_pool,
            settings,
            http_client: reqwest::Client::new(),
            _db_name: database_name,
            _management_pool: management_pool,
            _api_handle: api_handle,
        })
    }

    /// Base URL of the API under test, including the `/api` prefix.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.settings.api.public_url, path)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        info!("Tearing down test environment...");

        self._api_handle.abort();

        let db_name = self._db_name.clone();
        let pool = self._management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {}", db_name);
            let query = format!("DROP DATABASE \"{}\" WITH (FORCE)", db_name);
            pool.execute(query.as_str()).await.unwrap_or_else(|e| {
                panic!("Failed to drop test database {}: {}", db_name, e);
            });
        });

        info!("Teardown complete.");
    }
}
