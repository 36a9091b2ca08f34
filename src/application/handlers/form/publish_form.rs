//! PublishFormHandler - Command handler for the draft -> published transition.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, FormId, SerializableDomainEvent, Timestamp};
use crate::domain::form::{Form, FormError, FormPublished};
use crate::ports::{EventPublisher, FormRepository};

/// Command to publish a draft form.
#[derive(Debug, Clone)]
pub struct PublishFormCommand {
    pub form_id: FormId,
}

/// Result of successful publication.
#[derive(Debug, Clone)]
pub struct PublishFormResult {
    pub form: Form,
    pub event: FormPublished,
}

/// Handler for publishing forms.
pub struct PublishFormHandler {
    repository: Arc<dyn FormRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PublishFormHandler {
    pub fn new(
        repository: Arc<dyn FormRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: PublishFormCommand,
        metadata: CommandMetadata,
    ) -> Result<PublishFormResult, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        form.authorize(&metadata.user_id)?;
        form.publish()?;

        self.repository.update(&form).await?;

        let event = FormPublished {
            event_id: EventId::new(),
            form_id: *form.id(),
            owner_id: metadata.user_id.clone(),
            title: form.title().to_string(),
            published_at: Timestamp::now(),
        };

        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        tracing::info!(form_id = %form.id(), "form published");
        Ok(PublishFormResult { form, event })
    }
}
