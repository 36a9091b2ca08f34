//! GetFormHandler - Query handler for fetching a single form.

use std::sync::Arc;

use crate::domain::foundation::{FormId, UserId};
use crate::domain::form::{Form, FormError};
use crate::ports::FormRepository;

/// Query for a single form.
///
/// Drafts are visible to their owner only; published forms are readable by
/// any authenticated caller (the respondent-facing page needs the schema).
#[derive(Debug, Clone)]
pub struct GetFormQuery {
    pub form_id: FormId,
    pub user_id: UserId,
}

/// Handler for fetching forms.
pub struct GetFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl GetFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetFormQuery) -> Result<Form, FormError> {
        let form = self
            .repository
            .find_by_id(&query.form_id)
            .await?
            .ok_or(FormError::NotFound(query.form_id))?;

        if !form.is_published() {
            form.authorize(&query.user_id)?;
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryFormRepository;
    use crate::domain::foundation::FieldId;
    use crate::domain::form::{Field, FieldKind};

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn draft() -> Form {
        Form::new(
            FormId::new(),
            owner(),
            "Survey",
            vec![Field::new(
                FieldId::new("q1").unwrap(),
                "Q1",
                FieldKind::Text { pii: false },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn owner_reads_draft() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let form = draft();
        repo.save(&form).await.unwrap();
        let handler = GetFormHandler::new(repo);

        let fetched = handler
            .handle(GetFormQuery {
                form_id: *form.id(),
                user_id: owner(),
            })
            .await
            .unwrap();
        assert_eq!(fetched, form);
    }

    #[tokio::test]
    async fn stranger_cannot_read_draft() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let form = draft();
        repo.save(&form).await.unwrap();
        let handler = GetFormHandler::new(repo);

        let result = handler
            .handle(GetFormQuery {
                form_id: *form.id(),
                user_id: UserId::new("stranger").unwrap(),
            })
            .await;
        assert_eq!(result.unwrap_err(), FormError::Forbidden);
    }

    #[tokio::test]
    async fn anyone_authenticated_reads_published() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let mut form = draft();
        form.publish().unwrap();
        repo.save(&form).await.unwrap();
        let handler = GetFormHandler::new(repo);

        let fetched = handler
            .handle(GetFormQuery {
                form_id: *form.id(),
                user_id: UserId::new("respondent").unwrap(),
            })
            .await
            .unwrap();
        assert!(fetched.is_published());
    }

    #[tokio::test]
    async fn missing_form_is_not_found() {
        let repo = Arc::new(InMemoryFormRepository::new());
        let handler = GetFormHandler::new(repo);
        let result = handler
            .handle(GetFormQuery {
                form_id: FormId::new(),
                user_id: owner(),
            })
            .await;
        assert!(matches!(result, Err(FormError::NotFound(_))));
    }
}
