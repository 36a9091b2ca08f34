//! ExportResponsesHandler - Query handler for the CSV download.

use std::sync::Arc;

use crate::domain::foundation::{FormId, UserId};
use crate::domain::form::FormError;
use crate::ports::{ExportArtifact, ExportService, FormRepository, ResponseRepository};

/// Query for a downloadable export of a form's responses.
#[derive(Debug, Clone)]
pub struct ExportResponsesQuery {
    pub form_id: FormId,
    pub user_id: UserId,
}

/// Handler for exporting responses.
pub struct ExportResponsesHandler {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    export_service: Arc<dyn ExportService>,
}

impl ExportResponsesHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        export_service: Arc<dyn ExportService>,
    ) -> Self {
        Self {
            forms,
            responses,
            export_service,
        }
    }

    pub async fn handle(&self, query: ExportResponsesQuery) -> Result<ExportArtifact, FormError> {
        let form = self
            .forms
            .find_by_id(&query.form_id)
            .await?
            .ok_or(FormError::NotFound(query.form_id))?;

        form.authorize(&query.user_id)?;

        let responses = self.responses.find_by_form(form.id()).await?;
        Ok(self.export_service.export(&form, &responses).await?)
    }
}
