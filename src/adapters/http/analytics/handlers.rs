//! HTTP handlers for analytics and export endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::form_error_response;
use crate::adapters::http::form::handlers::parse_form_id;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::analytics::{
    ExportResponsesHandler, ExportResponsesQuery, GetAnalyticsHandler, GetAnalyticsQuery,
};

use super::dto::AnalyticsResponse;

#[derive(Clone)]
pub struct AnalyticsHandlers {
    get_handler: Arc<GetAnalyticsHandler>,
    export_handler: Arc<ExportResponsesHandler>,
}

impl AnalyticsHandlers {
    pub fn new(
        get_handler: Arc<GetAnalyticsHandler>,
        export_handler: Arc<ExportResponsesHandler>,
    ) -> Self {
        Self {
            get_handler,
            export_handler,
        }
    }
}

/// GET /api/forms/:id/analytics - Aggregated snapshot
pub async fn get_analytics(
    State(handlers): State<AnalyticsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetAnalyticsQuery {
            form_id,
            user_id: user.id,
        })
        .await
    {
        Ok(snapshot) => {
            (StatusCode::OK, Json(AnalyticsResponse::from(snapshot))).into_response()
        }
        Err(e) => form_error_response(e),
    }
}

/// GET /api/forms/:id/export.csv - Download responses
pub async fn export_responses(
    State(handlers): State<AnalyticsHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .export_handler
        .handle(ExportResponsesQuery {
            form_id,
            user_id: user.id,
        })
        .await
    {
        Ok(artifact) => {
            let disposition = format!("attachment; filename={}", artifact.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, artifact.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact.content,
            )
                .into_response()
        }
        Err(e) => form_error_response(e),
    }
}
