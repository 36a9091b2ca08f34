//! Field definitions - one question unit in a form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FieldId, ValidationError};

use super::answer::AnswerValue;

/// Default rating bounds when the author does not set them.
pub const DEFAULT_RATING_MIN: i32 = 1;
pub const DEFAULT_RATING_MAX: i32 = 5;

/// Kind-specific data for a field.
///
/// A closed set of variants: each pairs a type tag with the value shape it
/// accepts, its validation rule, and its aggregation behavior. There is no
/// "any"-typed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text. `pii` marks personally identifying content: implicitly
    /// required, never aggregated, never exported.
    Text {
        #[serde(default)]
        pii: bool,
    },
    /// Exactly one of the declared options.
    SingleChoice { options: Vec<String> },
    /// Any subset of the declared options.
    MultiSelect { options: Vec<String> },
    /// Integer scale between `min` and `max`, inclusive.
    Rating { min: i32, max: i32 },
}

impl FieldKind {
    /// Rating with the default 1..=5 bounds.
    pub fn default_rating() -> Self {
        FieldKind::Rating {
            min: DEFAULT_RATING_MIN,
            max: DEFAULT_RATING_MAX,
        }
    }

    /// Wire name of this kind ("text", "single_choice", ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::SingleChoice { .. } => "single_choice",
            FieldKind::MultiSelect { .. } => "multi_select",
            FieldKind::Rating { .. } => "rating",
        }
    }

    /// Declared options for choice-type kinds.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::SingleChoice { options } | FieldKind::MultiSelect { options } => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// Conditional-visibility rule: show the field only when another field's
/// answer equals `equals`.
///
/// Single-level by design - the referenced field's own visibility is never
/// consulted, and evaluation is one pass (no fixed-point iteration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowIf {
    pub field_id: FieldId,
    pub equals: ShowIfValue,
}

/// Scalar comparison value for a `ShowIf` rule.
///
/// The scalar's type must match the referenced field's answer type; for a
/// multi-select referent the scalar is an element the selections must
/// contain. Arrays are not valid comparison values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShowIfValue {
    Text(String),
    Number(f64),
}

impl ShowIfValue {
    /// Checks whether a submitted answer satisfies this rule value under the
    /// referenced field's equality semantics.
    pub fn matches(&self, kind: &FieldKind, answer: &AnswerValue) -> bool {
        match (kind, self, answer) {
            (FieldKind::Text { .. }, ShowIfValue::Text(expected), AnswerValue::Text(actual))
            | (
                FieldKind::SingleChoice { .. },
                ShowIfValue::Text(expected),
                AnswerValue::Text(actual),
            ) => expected == actual,
            (
                FieldKind::MultiSelect { .. },
                ShowIfValue::Text(expected),
                AnswerValue::Selections(actual),
            ) => actual.iter().any(|v| v == expected),
            (
                FieldKind::Rating { .. },
                ShowIfValue::Number(expected),
                AnswerValue::Number(actual),
            ) => expected == actual,
            // Mismatched shapes (scalar vs array, text vs number) never
            // compare equal.
            _ => false,
        }
    }
}

/// One question unit in a form: typed, ordered, optionally conditional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    id: FieldId,
    label: String,
    #[serde(flatten)]
    kind: FieldKind,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    show_if: Option<ShowIf>,
}

impl Field {
    /// Creates a field, enforcing per-field structural invariants.
    ///
    /// # Errors
    ///
    /// - rating bounds with `min > max`
    /// - a `show_if` rule referencing the field itself
    pub fn new(
        id: FieldId,
        label: impl Into<String>,
        kind: FieldKind,
        required: bool,
        show_if: Option<ShowIf>,
    ) -> Result<Self, ValidationError> {
        if let FieldKind::Rating { min, max } = kind {
            if min > max {
                return Err(ValidationError::invalid_format(
                    "rating",
                    format!("min {} exceeds max {}", min, max),
                ));
            }
        }
        if let Some(rule) = &show_if {
            if rule.field_id == id {
                return Err(ValidationError::invalid_format(
                    "show_if",
                    "a field cannot depend on its own answer",
                ));
            }
        }
        Ok(Self {
            id,
            label: label.into(),
            kind,
            required,
            show_if,
        })
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn show_if(&self) -> Option<&ShowIf> {
        self.show_if.as_ref()
    }

    /// PII fields are implicitly required regardless of the stored flag.
    pub fn is_required(&self) -> bool {
        self.required || self.is_pii()
    }

    /// True for text fields flagged as personally identifying.
    ///
    /// This single predicate drives both the aggregation exclusion and the
    /// export column exclusion, so the two can never drift apart.
    pub fn is_pii(&self) -> bool {
        matches!(self.kind, FieldKind::Text { pii: true })
    }

    /// Returns a copy with a different id (used by duplicate-field edits).
    pub fn with_id(&self, id: FieldId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}
