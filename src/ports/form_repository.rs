//! Form repository port.
//!
//! Defines the contract for persisting and retrieving Form aggregates.
//! Implementations handle the actual storage operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FormId, UserId};
use crate::domain::form::Form;

/// Repository port for Form aggregate persistence.
///
/// Implementations must persist the full aggregate (including the ordered
/// field sequence) atomically; a form is never observable with a partially
/// replaced schema.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Save a new form.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, form: &Form) -> Result<(), DomainError>;

    /// Update an existing form.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, form: &Form) -> Result<(), DomainError>;

    /// Find a form by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError>;

    /// Find all forms owned by a user, ordered by updated_at descending.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Form>, DomainError>;

    /// Delete a form (primarily for testing).
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    async fn delete(&self, id: &FormId) -> Result<(), DomainError>;
}
