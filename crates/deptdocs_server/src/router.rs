//! Router construction for the department documents server.

use axum::{
    middleware as axum_mw,
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::jwt::{jwt_auth, JwtConfig};
use crate::state::AppState;

/// Build the full axum router with all routes and middleware.
pub fn build_router(state: AppState, jwt_config: JwtConfig) -> Router {
    // Routes that require JWT authentication
    let protected = Router::new()
        .route(
            "/departments/documents",
            get(handlers::documents::department_documents),
        )
        .route(
            "/departments/documents/by-type",
            get(handlers::documents::department_documents_by_type),
        )
        .route("/documents", post(handlers::documents::store))
        .route("/documents/ingest", post(handlers::documents::ingest))
        .route(
            "/document-types/names",
            get(handlers::documents::document_type_names),
        )
        .route(
            "/departments",
            get(handlers::departments::index).post(handlers::departments::store),
        )
        .route(
            "/departments/:id",
            put(handlers::departments::update).delete(handlers::departments::destroy),
        )
        .route("/session/login", post(handlers::session::login))
        .route("/session/logout", post(handlers::session::logout))
        .route("/session/activity", get(handlers::session::activity))
        .layer(axum_mw::from_fn(jwt_auth))
        .layer(Extension(jwt_config));

    // Public routes (no auth)
    let public = Router::new().route("/health", get(handlers::health::health));

    public
        .merge(protected)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
