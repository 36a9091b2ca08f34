//! In-memory implementation of FormRepository.
//!
//! Default single-process wiring and test double. Forms are cloned on the
//! way in and out, so callers never share mutable aggregate state.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, FormId, UserId};
use crate::domain::form::Form;
use crate::ports::FormRepository;

/// In-memory form store keyed by form id.
pub struct InMemoryFormRepository {
    forms: RwLock<HashMap<FormId, Form>>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self {
            forms: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored forms (for test assertions).
    pub async fn len(&self) -> usize {
        self.forms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.forms.read().await.is_empty()
    }
}

impl Default for InMemoryFormRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn save(&self, form: &Form) -> Result<(), DomainError> {
        self.forms.write().await.insert(*form.id(), form.clone());
        Ok(())
    }

    async fn update(&self, form: &Form) -> Result<(), DomainError> {
        let mut forms = self.forms.write().await;
        if !forms.contains_key(form.id()) {
            return Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", form.id()),
            ));
        }
        forms.insert(*form.id(), form.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        Ok(self.forms.read().await.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Form>, DomainError> {
        let mut forms: Vec<Form> = self
            .forms
            .read()
            .await
            .values()
            .filter(|f| f.owner_id() == owner_id)
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(forms)
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        let removed = self.forms.write().await.remove(id);
        if removed.is_none() {
            return Err(DomainError::new(
                ErrorCode::FormNotFound,
                format!("Form not found: {}", id),
            ));
        }
        Ok(())
    }
}
