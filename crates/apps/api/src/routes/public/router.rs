use crate::api_state::ApiContext;
use crate::routes::public::handlers::shared_album;
use axum::{Router, routing::get};

pub fn public_album_router() -> Router<ApiContext> {
    Router::new().route("/public/albums/{token}", get(shared_album))
}
