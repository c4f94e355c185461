use crate::api_state::ApiContext;
use crate::routes::{album, auth, photos, public, root};
use axum::{Json, Router, routing::get};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health,
        // Auth handlers
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::refresh_session,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Album handlers
        album::handlers::list,
        album::handlers::create,
        album::handlers::details,
        album::handlers::update,
        album::handlers::remove,
        album::handlers::share,
        // Photo handlers
        photos::handlers::upload,
        photos::handlers::remove,
        // Public handlers
        public::handlers::shared_album,
    ),
    components(
        schemas(
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Albums", description = "Endpoints for managing photo albums"),
        (name = "Photos", description = "Endpoints for uploading and deleting photos"),
        (name = "Public", description = "Unauthenticated access to shared albums"),
        (name = "Root", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

pub fn openapi_router() -> Router<ApiContext> {
    Router::new().route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
