//! HTTP DTOs for form endpoints.
//!
//! These types decouple the HTTP API from domain types. The wire shape is
//! the flat field object the editor speaks (`type` tag, `isPII`, `showIf`),
//! mapped onto the closed domain variants.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FieldId, FormStatus, ValidationError};
use crate::domain::form::{
    Field, FieldKind, Form, ShowIf, ShowIfValue, DEFAULT_RATING_MAX, DEFAULT_RATING_MIN,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormRequest {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
    /// Creating directly as "published" runs the publication checks after
    /// the save, exactly like a separate publish call.
    #[serde(default)]
    pub status: Option<FormStatus>,
}

/// Request to update a draft form.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFormRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldDto>>,
    /// Setting "published" here is the editor's publish action.
    #[serde(default)]
    pub status: Option<FormStatus>,
}

/// Flat wire representation of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDto {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIfDto>,
    #[serde(rename = "isPII", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pii: bool,
}

/// Wire representation of a visibility rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowIfDto {
    pub field_id: String,
    pub equals: ShowIfValue,
}

impl FieldDto {
    /// Maps the wire shape onto a domain field.
    ///
    /// Rating bounds default to 1..=5 when omitted, matching the editor.
    pub fn into_domain(self) -> Result<Field, ValidationError> {
        let kind = match self.field_type.as_str() {
            "text" => FieldKind::Text { pii: self.is_pii },
            "single_choice" => FieldKind::SingleChoice {
                options: self.options.unwrap_or_default(),
            },
            "multi_select" => FieldKind::MultiSelect {
                options: self.options.unwrap_or_default(),
            },
            "rating" => FieldKind::Rating {
                min: self.min.unwrap_or(DEFAULT_RATING_MIN),
                max: self.max.unwrap_or(DEFAULT_RATING_MAX),
            },
            other => {
                return Err(ValidationError::invalid_format(
                    "type",
                    format!("unknown field type '{}'", other),
                ))
            }
        };

        let show_if = self
            .show_if
            .map(|rule| {
                Ok::<_, ValidationError>(ShowIf {
                    field_id: FieldId::new(rule.field_id)?,
                    equals: rule.equals,
                })
            })
            .transpose()?;

        Field::new(FieldId::new(self.id)?, self.label, kind, self.required, show_if)
    }

    /// Renders a domain field back onto the wire.
    pub fn from_domain(field: &Field) -> Self {
        let (options, min, max, is_pii) = match field.kind() {
            FieldKind::Text { pii } => (None, None, None, *pii),
            FieldKind::SingleChoice { options } | FieldKind::MultiSelect { options } => {
                (Some(options.clone()), None, None, false)
            }
            FieldKind::Rating { min, max } => (None, Some(*min), Some(*max), false),
        };

        Self {
            id: field.id().to_string(),
            label: field.label().to_string(),
            field_type: field.kind().type_name().to_string(),
            required: field.is_required(),
            options,
            min,
            max,
            show_if: field.show_if().map(|rule| ShowIfDto {
                field_id: rule.field_id.to_string(),
                equals: rule.equals.clone(),
            }),
            is_pii,
        }
    }
}

/// Converts a whole field list, failing on the first bad entry.
pub fn fields_into_domain(fields: Vec<FieldDto>) -> Result<Vec<Field>, ValidationError> {
    fields.into_iter().map(FieldDto::into_domain).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Detailed form view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub status: FormStatus,
    pub fields: Vec<FieldDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Form> for FormResponse {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id().to_string(),
            owner_id: form.owner_id().to_string(),
            title: form.title().to_string(),
            status: form.status(),
            fields: form.fields().iter().map(FieldDto::from_domain).collect(),
            created_at: form.created_at().to_rfc3339(),
            updated_at: form.updated_at().to_rfc3339(),
        }
    }
}

/// Form list entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummaryResponse {
    pub id: String,
    pub title: String,
    pub status: FormStatus,
    pub field_count: usize,
    pub updated_at: String,
}

impl From<&Form> for FormSummaryResponse {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id().to_string(),
            title: form.title().to_string(),
            status: form.status(),
            field_count: form.fields().len(),
            updated_at: form.updated_at().to_rfc3339(),
        }
    }
}
