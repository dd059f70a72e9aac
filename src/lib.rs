pub mod config;
pub mod discogs;
pub mod error;
pub mod handler;

use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::discogs::DiscogsClient;

/// Builds the service router around an already-configured Discogs client.
/// Kept separate from `main` so tests can serve it on an ephemeral port.
pub fn app(client: DiscogsClient) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler::hello))
        .route("/random", get(handler::random_release))
        .layer(cors)
        .layer(Extension(client))
}
