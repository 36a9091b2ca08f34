//! Export service port - tabular response export.
//!
//! The domain builds the logical table (see `domain::analytics::build_rows`);
//! adapters own the artifact format. Column policy is fixed by the domain:
//! PII columns are excluded with the same rule the aggregator uses.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::form::Form;
use crate::domain::response::Response;

/// A rendered export artifact ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested download filename (e.g., "responses.csv").
    pub filename: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Rendered bytes.
    pub content: Vec<u8>,
}

/// Port for exporting a form's responses as a downloadable artifact.
#[async_trait]
pub trait ExportService: Send + Sync {
    /// Render all given responses of a form.
    ///
    /// # Errors
    ///
    /// - `InternalError` if rendering fails
    async fn export(
        &self,
        form: &Form,
        responses: &[Response],
    ) -> Result<ExportArtifact, DomainError>;
}
