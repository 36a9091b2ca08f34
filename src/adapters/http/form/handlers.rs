//! HTTP handlers for form endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{form_error_response, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::form::{
    CreateFormCommand, CreateFormHandler, GetFormHandler, GetFormQuery, ListFormsHandler,
    ListFormsQuery, PublishFormCommand, PublishFormHandler, UpdateFormCommand, UpdateFormHandler,
};
use crate::domain::foundation::{CommandMetadata, FormId, FormStatus};
use crate::domain::form::FormError;

use super::dto::{
    fields_into_domain, CreateFormRequest, FormResponse, FormSummaryResponse, UpdateFormRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormHandlers {
    create_handler: Arc<CreateFormHandler>,
    update_handler: Arc<UpdateFormHandler>,
    publish_handler: Arc<PublishFormHandler>,
    get_handler: Arc<GetFormHandler>,
    list_handler: Arc<ListFormsHandler>,
}

impl FormHandlers {
    pub fn new(
        create_handler: Arc<CreateFormHandler>,
        update_handler: Arc<UpdateFormHandler>,
        publish_handler: Arc<PublishFormHandler>,
        get_handler: Arc<GetFormHandler>,
        list_handler: Arc<ListFormsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            publish_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/forms - Create a new form
pub async fn create_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateFormRequest>,
) -> Response {
    let fields = match fields_into_domain(req.fields) {
        Ok(fields) => fields,
        Err(e) => return form_error_response(FormError::from(e)),
    };

    let cmd = CreateFormCommand {
        owner_id: user.id.clone(),
        title: req.title,
        fields,
    };

    let form = match handlers.create_handler.handle(cmd).await {
        Ok(result) => result.form,
        Err(e) => return form_error_response(e),
    };

    // "status": "published" on create is a save-then-publish.
    if req.status == Some(FormStatus::Published) {
        let metadata = CommandMetadata::new(user.id).with_correlation_id("http");
        match handlers
            .publish_handler
            .handle(PublishFormCommand { form_id: *form.id() }, metadata)
            .await
        {
            Ok(result) => {
                return (StatusCode::CREATED, Json(FormResponse::from(&result.form)))
                    .into_response()
            }
            Err(e) => return form_error_response(e),
        }
    }

    (StatusCode::CREATED, Json(FormResponse::from(&form))).into_response()
}

/// GET /api/forms - List the caller's forms
pub async fn list_forms(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_handler
        .handle(ListFormsQuery { owner_id: user.id })
        .await
    {
        Ok(forms) => {
            let summaries: Vec<FormSummaryResponse> =
                forms.iter().map(FormSummaryResponse::from).collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => form_error_response(e),
    }
}

/// GET /api/forms/:id - Fetch one form
pub async fn get_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetFormQuery {
            form_id,
            user_id: user.id,
        })
        .await
    {
        Ok(form) => (StatusCode::OK, Json(FormResponse::from(&form))).into_response(),
        Err(e) => form_error_response(e),
    }
}

/// PUT /api/forms/:id - Edit a draft (and optionally publish it)
pub async fn update_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
    Json(req): Json<UpdateFormRequest>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let fields = match req.fields.map(fields_into_domain).transpose() {
        Ok(fields) => fields,
        Err(e) => return form_error_response(FormError::from(e)),
    };

    let wants_publish = req.status == Some(FormStatus::Published);
    let has_edits = req.title.is_some() || fields.is_some();

    let mut form = None;
    if has_edits {
        let cmd = UpdateFormCommand {
            form_id,
            user_id: user.id.clone(),
            title: req.title,
            fields,
        };
        match handlers.update_handler.handle(cmd).await {
            Ok(result) => form = Some(result.form),
            Err(e) => return form_error_response(e),
        }
    }

    if wants_publish {
        let metadata = CommandMetadata::new(user.id).with_correlation_id("http");
        match handlers
            .publish_handler
            .handle(PublishFormCommand { form_id }, metadata)
            .await
        {
            Ok(result) => form = Some(result.form),
            Err(e) => return form_error_response(e),
        }
    }

    match form {
        Some(form) => (StatusCode::OK, Json(FormResponse::from(&form))).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Nothing to update")),
        )
            .into_response(),
    }
}

/// POST /api/forms/:id/publish - Publish a draft
pub async fn publish_form(
    State(handlers): State<FormHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Response {
    let form_id = match parse_form_id(&form_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let metadata = CommandMetadata::new(user.id).with_correlation_id("http");
    match handlers
        .publish_handler
        .handle(PublishFormCommand { form_id }, metadata)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(FormResponse::from(&result.form))).into_response(),
        Err(e) => form_error_response(e),
    }
}

pub(crate) fn parse_form_id(raw: &str) -> Result<FormId, Response> {
    raw.parse::<FormId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid form ID")),
        )
            .into_response()
    })
}
