//! Total Aéreas site library.
//!
//! This crate provides the marketing site and the demo product dashboard as a
//! library, allowing it to be tested and reused. The binary in `main.rs`
//! adds configuration loading, Sentry, logging and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Request, header::CACHE_CONTROL},
    middleware as axum_middleware,
    routing::get,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeader, trace::TraceLayer};

use state::AppState;

/// Cache policy for files under `/static`. Pages get `no-store` from the
/// security headers middleware instead.
pub const STATIC_CACHE_CONTROL: &str = "public, max-age=3600";

/// Build the site router.
///
/// Includes every route, static files, sessions, request ids, security
/// headers and request tracing. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_files = SetResponseHeader::if_not_present(
        ServeDir::new(&state.config().static_dir),
        CACHE_CONTROL,
        HeaderValue::from_static(STATIC_CACHE_CONTROL),
    );

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{MockDelays, SiteConfig};

    fn test_app() -> Router {
        let config = SiteConfig {
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            delays: MockDelays {
                auth: std::time::Duration::ZERO,
                catalog: std::time::Duration::ZERO,
            },
            ..SiteConfig::default()
        };
        app(AppState::new(config))
    }

    #[tokio::test]
    async fn test_static_files_are_cacheable() {
        let response = test_app()
            .oneshot(Request::get("/static/css/main.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            STATIC_CACHE_CONTROL
        );
    }

    #[tokio::test]
    async fn test_health_is_not_cached() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(CACHE_CONTROL).unwrap(),
            "no-store, max-age=0"
        );
    }
}
