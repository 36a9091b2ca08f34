//! Response repository port.
//!
//! Responses are append-only: once accepted they are immutable, so the
//! contract has no update operation.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FormId, ResponseId};
use crate::domain::response::Response;

/// Repository port for accepted responses.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Persist an accepted response.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, response: &Response) -> Result<(), DomainError>;

    /// Find a response by its ID.
    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, DomainError>;

    /// All responses for a form, in acceptance order.
    ///
    /// Acceptance order matters: analytics replay must fold responses in
    /// the order they were applied.
    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<Response>, DomainError>;

    /// Number of accepted responses for a form.
    async fn count_by_form(&self, form_id: &FormId) -> Result<u64, DomainError>;
}
