use crate::api_state::ApiContext;
use crate::routes::album::handlers;
use axum::{
    Router,
    routing::{get, post},
};

pub fn album_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/albums", get(handlers::list).post(handlers::create))
        .route(
            "/albums/{album_id}",
            get(handlers::details)
                .put(handlers::update)
                .delete(handlers::remove),
        )
        .route("/albums/{album_id}/share", post(handlers::share))
}
