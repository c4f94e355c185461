pub mod album;
mod api_doc;
pub mod auth;
pub mod photos;
pub mod public;
pub mod root;

use crate::api_state::ApiContext;
use crate::routes::album::router::album_protected_router;
use crate::routes::api_doc::openapi_router;
use crate::routes::auth::middlewares::user::ApiUser;
use crate::routes::auth::router::{auth_protected_router, auth_public_router};
use crate::routes::photos::router::photos_protected_router;
use crate::routes::public::router::public_album_router;
use crate::routes::root::router::root_public_router;
use axum::Router;
use axum::middleware::from_extractor_with_state;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(openapi_router())
        .merge(root_public_router())
        .nest("/api", api_routes(api_state.clone()))
        .with_state(api_state)
}

fn api_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(api_state))
}

fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router())
        .merge(public_album_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(album_protected_router())
        .merge(photos_protected_router(&api_state.settings.upload))
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
