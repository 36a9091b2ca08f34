//! SubmitResponseHandler - the respondent-facing submission pipeline.
//!
//! Order matters here:
//!
//! 1. re-read the persisted form and gate on `Published` - validation always
//!    runs against the schema actively published at submission time, never a
//!    draft copy under concurrent edit
//! 2. validate (first violation wins, schema order)
//! 3. persist the response
//! 4. fold it into the analytics state
//! 5. emit `response.accepted.v1` so live dashboards re-fetch
//!
//! Steps 4 and 5 never fail the accepted response: analytics state is
//! derived and recoverable by replay, and notifier delivery guarantees are
//! the host's concern.

use std::sync::Arc;

use crate::domain::foundation::{EventId, FormId, ResponseId, SerializableDomainEvent, Timestamp};
use crate::domain::form::{validate, AnswerMap, FormError, ResponseAccepted};
use crate::domain::response::Response;
use crate::ports::{AnalyticsStore, EventPublisher, FormRepository, ResponseRepository};

/// Command carrying a respondent's raw answer map.
///
/// Submissions are anonymous: the respondent endpoint is public, so there is
/// no acting-user metadata here.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub form_id: FormId,
    pub answers: AnswerMap,
}

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmitResponseResult {
    pub response: Response,
}

/// Handler for response submission.
pub struct SubmitResponseHandler {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    analytics: Arc<dyn AnalyticsStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitResponseHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        analytics: Arc<dyn AnalyticsStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            forms,
            responses,
            analytics,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitResponseCommand,
    ) -> Result<SubmitResponseResult, FormError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        if !form.is_published() {
            return Err(FormError::NotPublished);
        }

        validate(&form, &cmd.answers).map_err(FormError::ResponseInvalid)?;

        let response = Response::new(ResponseId::new(), *form.id(), cmd.answers);
        self.responses.save(&response).await?;

        if let Err(e) = self
            .analytics
            .apply_response(&form, response.answers())
            .await
        {
            // Analytics state is derived; a missed fold is recovered by
            // replay on the next snapshot rebuild.
            tracing::warn!(form_id = %form.id(), error = %e, "analytics fold failed");
        }

        let event = ResponseAccepted {
            event_id: EventId::new(),
            form_id: *form.id(),
            response_id: *response.id(),
            submitted_at: Timestamp::now(),
        };
        if let Err(e) = self.event_publisher.publish(event.to_envelope()).await {
            tracing::warn!(form_id = %form.id(), error = %e, "accepted-response signal failed");
        }

        tracing::debug!(form_id = %form.id(), response_id = %response.id(), "response accepted");
        Ok(SubmitResponseResult { response })
    }
}
