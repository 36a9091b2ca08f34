//! ListFormsHandler - Query handler for the owner's form list.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::form::{Form, FormError};
use crate::ports::FormRepository;

/// Query for all forms owned by a user.
#[derive(Debug, Clone)]
pub struct ListFormsQuery {
    pub owner_id: UserId,
}

/// Handler for listing forms.
pub struct ListFormsHandler {
    repository: Arc<dyn FormRepository>,
}

impl ListFormsHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    /// Returns the owner's forms, most recently updated first.
    pub async fn handle(&self, query: ListFormsQuery) -> Result<Vec<Form>, FormError> {
        Ok(self.repository.find_by_owner(&query.owner_id).await?)
    }
}
