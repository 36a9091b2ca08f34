//! HTTP routes for analytics endpoints.

use axum::{routing::get, Router};

use super::handlers::{export_responses, get_analytics, AnalyticsHandlers};

/// Creates the analytics router.
pub fn analytics_routes(handlers: AnalyticsHandlers) -> Router {
    Router::new()
        .route("/:id/analytics", get(get_analytics))
        .route("/:id/export.csv", get(export_responses))
        .with_state(handlers)
}
