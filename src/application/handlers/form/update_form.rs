//! UpdateFormHandler - Command handler for editing draft forms.
//!
//! The HTTP editor saves the whole field sequence at once; the aggregate's
//! finer-grained edit commands back that replace. Edits against a published
//! form fail with `FormLocked` before any persistence call.

use std::sync::Arc;

use crate::domain::foundation::{FormId, UserId};
use crate::domain::form::{Field, Form, FormError};
use crate::ports::FormRepository;

/// Command to update a draft form's title and/or fields.
#[derive(Debug, Clone)]
pub struct UpdateFormCommand {
    pub form_id: FormId,
    pub user_id: UserId,
    pub title: Option<String>,
    pub fields: Option<Vec<Field>>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateFormResult {
    pub form: Form,
}

/// Handler for updating forms.
pub struct UpdateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl UpdateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateFormCommand) -> Result<UpdateFormResult, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(FormError::NotFound(cmd.form_id))?;

        form.authorize(&cmd.user_id)?;

        if let Some(title) = cmd.title {
            form.set_title(title)?;
        }
        if let Some(fields) = cmd.fields {
            form.replace_fields(fields)?;
        }

        self.repository.update(&form).await?;

        tracing::debug!(form_id = %form.id(), "form updated");
        Ok(UpdateFormResult { form })
    }
}
