//! Form lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a form.
///
/// `Draft` forms may be edited freely. `Published` is terminal: the schema
/// becomes immutable and only respondent-facing data (responses) may still
/// be created against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
}

impl FormStatus {
    /// Returns true if the schema may still be mutated.
    pub fn is_mutable(&self) -> bool {
        matches!(self, FormStatus::Draft)
    }

    /// Returns true if responses may be submitted.
    pub fn accepts_responses(&self) -> bool {
        matches!(self, FormStatus::Published)
    }

    /// Wire representation used by the persistence layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Published => "published",
        }
    }

    /// Parses the persistence-layer representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(FormStatus::Draft),
            "published" => Some(FormStatus::Published),
            _ => None,
        }
    }
}

impl StateMachine for FormStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (FormStatus::Draft, FormStatus::Published))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            FormStatus::Draft => vec![FormStatus::Published],
            FormStatus::Published => vec![],
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
