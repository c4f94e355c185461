use crate::api_state::ApiContext;
use crate::routes::root::handlers::health;
use axum::{Router, routing::get};

pub fn root_public_router() -> Router<ApiContext> {
    Router::new().route("/health", get(health))
}
