//! Response entity.
//!
//! Responses are created only against published forms and are immutable
//! once accepted: there are no mutation methods, only construction and
//! reconstitution from persistence.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FormId, ResponseId, Timestamp};
use crate::domain::form::AnswerMap;

/// One accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    id: ResponseId,
    form_id: FormId,
    answers: AnswerMap,
    submitted_at: Timestamp,
}

impl Response {
    /// Creates a newly accepted response.
    ///
    /// Callers are expected to have validated `answers` against the
    /// published schema first; this constructor records, it does not judge.
    pub fn new(id: ResponseId, form_id: FormId, answers: AnswerMap) -> Self {
        Self {
            id,
            form_id,
            answers,
            submitted_at: Timestamp::now(),
        }
    }

    /// Reconstitute a response from persistence.
    pub fn reconstitute(
        id: ResponseId,
        form_id: FormId,
        answers: AnswerMap,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            form_id,
            answers,
            submitted_at,
        }
    }

    pub fn id(&self) -> &ResponseId {
        &self.id
    }

    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn submitted_at(&self) -> &Timestamp {
        &self.submitted_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::FieldId;
    use crate::domain::form::AnswerValue;

    #[test]
    fn response_preserves_answers() {
        let mut answers = AnswerMap::new();
        answers.insert(FieldId::new("q1").unwrap(), AnswerValue::from("Yes"));

        let response = Response::new(ResponseId::new(), FormId::new(), answers.clone());
        assert_eq!(response.answers(), &answers);
    }

    #[test]
    fn reconstitute_preserves_timestamp() {
        let submitted_at: Timestamp = serde_json::from_str("\"2024-03-01T12:00:00Z\"").unwrap();
        let response = Response::reconstitute(
            ResponseId::new(),
            FormId::new(),
            AnswerMap::new(),
            submitted_at,
        );
        assert_eq!(response.submitted_at(), &submitted_at);
    }
}
