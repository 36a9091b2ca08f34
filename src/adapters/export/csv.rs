//! CSV export service adapter.
//!
//! Implements the `ExportService` port. The domain builds the logical table
//! (`build_rows`, which owns the PII-column and hidden-value policy); this
//! adapter only handles RFC 4180 cell quoting and byte assembly.

use async_trait::async_trait;

use crate::domain::analytics::build_rows;
use crate::domain::foundation::DomainError;
use crate::domain::form::Form;
use crate::domain::response::Response;
use crate::ports::{ExportArtifact, ExportService};

/// CSV renderer for response exports.
#[derive(Debug, Clone, Default)]
pub struct CsvExportService;

impl CsvExportService {
    pub fn new() -> Self {
        Self
    }

    fn render(rows: &[Vec<String>]) -> String {
        let mut out = String::new();
        for row in rows {
            let mut first = true;
            for cell in row {
                if !first {
                    out.push(',');
                }
                first = false;
                out.push_str(&escape_cell(cell));
            }
            out.push_str("\r\n");
        }
        out
    }
}

/// Quotes a cell when it contains a comma, quote, or line break; embedded
/// quotes are doubled per RFC 4180.
fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[async_trait]
impl ExportService for CsvExportService {
    async fn export(
        &self,
        form: &Form,
        responses: &[Response],
    ) -> Result<ExportArtifact, DomainError> {
        let rows = build_rows(form, responses);
        let content = Self::render(&rows);

        Ok(ExportArtifact {
            filename: "responses.csv".to_string(),
            content_type: "text/csv".to_string(),
            content: content.into_bytes(),
        })
    }
}
