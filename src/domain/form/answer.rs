//! Respondent answer values.
//!
//! An answer map pairs field ids with submitted values. The value shape
//! depends on the field kind: strings for text and single choice, string
//! arrays for multi select, numbers for ratings. The closed enum replaces
//! the untyped per-field payloads of earlier revisions; validation decides
//! whether a given shape is acceptable for a given field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::FieldId;

/// Map of field id to submitted answer value.
///
/// BTreeMap keeps iteration deterministic, which matters for reproducible
/// CSV exports and stable test assertions.
pub type AnswerMap = BTreeMap<FieldId, AnswerValue>;

/// A single submitted answer.
///
/// Untagged on the wire: `"Red"`, `["Red", "Blue"]`, and `4` deserialize to
/// `Text`, `Selections`, and `Number` respectively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Selections(Vec<String>),
    Number(f64),
}

impl AnswerValue {
    /// Returns the text content, if this is a text-shaped answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selections, if this is an array-shaped answer.
    pub fn as_selections(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selections(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number-shaped answer.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// An empty string or empty array counts as "not answered".
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.is_empty(),
            AnswerValue::Selections(v) => v.is_empty(),
            AnswerValue::Number(_) => false,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(v: Vec<String>) -> Self {
        AnswerValue::Selections(v)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<i32> for AnswerValue {
    fn from(n: i32) -> Self {
        AnswerValue::Number(n as f64)
    }
}
