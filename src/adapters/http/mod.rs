//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! `api_router` assembles them under `/api/forms` behind the auth
//! middleware (the submit endpoint stays public - the middleware passes
//! token-less requests through and `RequireAuth` gates per handler).

pub mod analytics;
pub mod error;
pub mod form;
pub mod middleware;
pub mod response;

pub use analytics::{analytics_routes, AnalyticsHandlers};
pub use error::{form_error_response, ErrorResponse};
pub use form::{form_routes, FormHandlers};
pub use response::{response_routes, ResponseHandlers};

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};

use middleware::{auth_middleware, AuthState};

/// Assembles the full API router.
pub fn api_router(
    form_handlers: FormHandlers,
    response_handlers: ResponseHandlers,
    analytics_handlers: AnalyticsHandlers,
    auth_state: AuthState,
) -> Router {
    let forms = form_routes(form_handlers)
        .merge(response_routes(response_handlers))
        .merge(analytics_routes(analytics_handlers));

    Router::new()
        .nest("/api/forms", forms)
        .layer(from_fn_with_state(auth_state, auth_middleware))
        .route("/health", get(health))
}

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
