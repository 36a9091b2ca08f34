//! HTTP handlers for response submission.
//!
//! The submit endpoint is public: respondents follow a share link and are
//! not authenticated. Everything else about the form stays owner-gated.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::form_error_response;
use crate::adapters::http::form::handlers::parse_form_id;
use crate::application::handlers::response::{SubmitResponseCommand, SubmitResponseHandler};

use super::dto::{ResponseDto, SubmitResponseRequest};

#[derive(Clone)]
pub struct ResponseHandlers {
    submit_handler: Arc<SubmitResponseHandler>,
}

impl ResponseHandlers {
    pub fn new(submit_handler: Arc<SubmitResponseHandler>) -> Self {
        Self { submit_handler }
    }
}

/// POST /api/forms/:id/responses - Submit a response (public)
pub async fn submit_response(
    State(handlers): State<ResponseHandlers>,
    Path(form_id): Path<String>,
    Json(req): Json<SubmitResponseRequest>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitResponseCommand {
        form_id,
        answers: req.answers,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(ResponseDto::from(&result.response))).into_response()
        }
        Err(e) => form_error_response(e),
    }
}
