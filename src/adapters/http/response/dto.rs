//! HTTP DTOs for response submission.

use serde::{Deserialize, Serialize};

use crate::domain::form::AnswerMap;
use crate::domain::response::Response;

/// Request body for submitting a response.
///
/// `answers` maps field ids to values; the value shape per field kind is
/// a string, string array, or number. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub answers: AnswerMap,
}

/// Echoed view of an accepted response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub id: String,
    pub form_id: String,
    pub answers: AnswerMap,
    pub submitted_at: String,
}

impl From<&Response> for ResponseDto {
    fn from(response: &Response) -> Self {
        Self {
            id: response.id().to_string(),
            form_id: response.form_id().to_string(),
            answers: response.answers().clone(),
            submitted_at: response.submitted_at().to_rfc3339(),
        }
    }
}
