//! Domain events emitted by the form module.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, FormId, ResponseId, Timestamp, UserId};
use crate::domain_event;

/// A draft form transitioned to published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPublished {
    pub event_id: EventId,
    pub form_id: FormId,
    pub owner_id: UserId,
    pub title: String,
    pub published_at: Timestamp,
}

domain_event!(
    FormPublished,
    event_type = "form.published.v1",
    schema_version = 1,
    aggregate_id = form_id,
    aggregate_type = "Form",
    occurred_at = published_at,
    event_id = event_id
);

/// A response passed validation and was persisted.
///
/// The aggregate id is the *form* id so subscribers (the live dashboard
/// bridge) can route by form without unpacking the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseAccepted {
    pub event_id: EventId,
    pub form_id: FormId,
    pub response_id: ResponseId,
    pub submitted_at: Timestamp,
}

domain_event!(
    ResponseAccepted,
    event_type = "response.accepted.v1",
    schema_version = 1,
    aggregate_id = form_id,
    aggregate_type = "Form",
    occurred_at = submitted_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn response_accepted_routes_by_form_id() {
        let form_id = FormId::new();
        let event = ResponseAccepted {
            event_id: EventId::new(),
            form_id,
            response_id: ResponseId::new(),
            submitted_at: Timestamp::now(),
        };
        assert_eq!(event.aggregate_id(), form_id.to_string());
        assert_eq!(event.event_type(), "response.accepted.v1");
    }

    #[test]
    fn form_published_converts_to_envelope() {
        let event = FormPublished {
            event_id: EventId::new(),
            form_id: FormId::new(),
            owner_id: UserId::new("owner-1").unwrap(),
            title: "Feedback".to_string(),
            published_at: Timestamp::now(),
        };
        let envelope = event.to_envelope();
        assert_eq!(envelope.event_type, "form.published.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.aggregate_type, "Form");
    }
}
