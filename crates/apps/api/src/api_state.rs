use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::storage_client::StorageClient;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub storage: StorageClient,
}

// These impls let axum extract individual pieces of the state, which keeps
// middleware and extractors from depending on the whole context.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for StorageClient {
    fn from_ref(state: &ApiContext) -> Self {
        state.storage.clone()
    }
}
