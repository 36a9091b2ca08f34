//! CreateFormHandler - Command handler for creating draft forms.

use std::sync::Arc;

use crate::domain::foundation::{FormId, UserId};
use crate::domain::form::{Field, Form, FormError};
use crate::ports::FormRepository;

/// Command to create a new draft form.
#[derive(Debug, Clone)]
pub struct CreateFormCommand {
    pub owner_id: UserId,
    pub title: String,
    pub fields: Vec<Field>,
}

/// Result of successful form creation.
#[derive(Debug, Clone)]
pub struct CreateFormResult {
    pub form: Form,
}

/// Handler for creating forms.
pub struct CreateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl CreateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateFormCommand) -> Result<CreateFormResult, FormError> {
        let form = Form::new(FormId::new(), cmd.owner_id, cmd.title, cmd.fields)?;
        self.repository.save(&form).await?;

        tracing::info!(form_id = %form.id(), "form created");
        Ok(CreateFormResult { form })
    }
}
