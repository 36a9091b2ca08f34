//! HTTP routes for response submission.

use axum::{routing::post, Router};

use super::handlers::{submit_response, ResponseHandlers};

/// Creates the response router.
pub fn response_routes(handlers: ResponseHandlers) -> Router {
    Router::new()
        .route("/:id/responses", post(submit_response))
        .with_state(handlers)
}
