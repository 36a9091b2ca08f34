//! Form-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, FieldId, FormId, ValidationError};

use super::validation::ResponseViolation;

/// Form-specific errors.
///
/// `Locked` (mutation of a published schema) is deliberately distinct from
/// `ResponseInvalid` (a rejected submission) so clients can decide whether
/// offering a retry makes sense.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// Form was not found.
    NotFound(FormId),
    /// A referenced field does not exist on the form.
    FieldNotFound(FieldId),
    /// User is not authorized to manage this form.
    Forbidden,
    /// Mutation attempted on a published form.
    Locked,
    /// Publish attempted on an already-published form.
    AlreadyPublished,
    /// Response submitted against a form that is not published.
    NotPublished,
    /// The form cannot be published; every blocker listed.
    SchemaInvalid(Vec<String>),
    /// A submitted response violated the schema.
    ResponseInvalid(ResponseViolation),
    /// Invalid state for operation.
    InvalidState(String),
    /// Structural validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl FormError {
    pub fn not_found(id: FormId) -> Self {
        FormError::NotFound(id)
    }

    pub fn field_not_found(id: FieldId) -> Self {
        FormError::FieldNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        FormError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::NotFound(_) => ErrorCode::FormNotFound,
            FormError::FieldNotFound(_) => ErrorCode::FieldNotFound,
            FormError::Forbidden => ErrorCode::Forbidden,
            FormError::Locked => ErrorCode::FormLocked,
            FormError::AlreadyPublished => ErrorCode::AlreadyPublished,
            FormError::NotPublished => ErrorCode::FormNotPublished,
            FormError::SchemaInvalid(_) => ErrorCode::SchemaInvalid,
            FormError::ResponseInvalid(_) => ErrorCode::ResponseInvalid,
            FormError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            FormError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FormError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FormError::NotFound(id) => format!("Form not found: {}", id),
            FormError::FieldNotFound(id) => format!("Field not found: {}", id),
            FormError::Forbidden => "Permission denied".to_string(),
            FormError::Locked => "Published forms cannot be edited".to_string(),
            FormError::AlreadyPublished => "Form is already published".to_string(),
            FormError::NotPublished => "Form is not accepting responses".to_string(),
            FormError::SchemaInvalid(reasons) => reasons.join("; "),
            FormError::ResponseInvalid(violation) => violation.to_string(),
            FormError::InvalidState(msg) => format!("Invalid state: {}", msg),
            FormError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FormError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FormError {}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { ref field } => FormError::ValidationFailed {
                field: field.clone(),
                message: err.to_string(),
            },
            ValidationError::OutOfRange { ref field, .. } => FormError::ValidationFailed {
                field: field.clone(),
                message: err.to_string(),
            },
            ValidationError::InvalidFormat { ref field, .. } => FormError::ValidationFailed {
                field: field.clone(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for FormError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => FormError::Forbidden,
            ErrorCode::FormLocked => FormError::Locked,
            ErrorCode::ValidationFailed => FormError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => FormError::Infrastructure(err.to_string()),
        }
    }
}
