//! In-memory implementation of ResponseRepository.
//!
//! Append-only, acceptance-ordered, matching the analytics replay contract.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, FormId, ResponseId};
use crate::domain::response::Response;
use crate::ports::ResponseRepository;

/// In-memory response store, kept in acceptance order.
pub struct InMemoryResponseRepository {
    responses: RwLock<Vec<Response>>,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryResponseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn save(&self, response: &Response) -> Result<(), DomainError> {
        self.responses.write().await.push(response.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, DomainError> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<Response>, DomainError> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.form_id() == form_id)
            .cloned()
            .collect())
    }

    async fn count_by_form(&self, form_id: &FormId) -> Result<u64, DomainError> {
        Ok(self
            .responses
            .read()
            .await
            .iter()
            .filter(|r| r.form_id() == form_id)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::AnswerMap;

    #[tokio::test]
    async fn responses_are_scoped_by_form() {
        let repo = InMemoryResponseRepository::new();
        let form_a = FormId::new();
        let form_b = FormId::new();

        repo.save(&Response::new(ResponseId::new(), form_a, AnswerMap::new()))
            .await
            .unwrap();
        repo.save(&Response::new(ResponseId::new(), form_b, AnswerMap::new()))
            .await
            .unwrap();
        repo.save(&Response::new(ResponseId::new(), form_a, AnswerMap::new()))
            .await
            .unwrap();

        assert_eq!(repo.count_by_form(&form_a).await.unwrap(), 2);
        assert_eq!(repo.count_by_form(&form_b).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_form_preserves_acceptance_order() {
        let repo = InMemoryResponseRepository::new();
        let form_id = FormId::new();
        let first = Response::new(ResponseId::new(), form_id, AnswerMap::new());
        let second = Response::new(ResponseId::new(), form_id, AnswerMap::new());
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let stored = repo.find_by_form(&form_id).await.unwrap();
        assert_eq!(stored[0].id(), first.id());
        assert_eq!(stored[1].id(), second.id());
    }

    #[tokio::test]
    async fn find_by_id_locates_response() {
        let repo = InMemoryResponseRepository::new();
        let response = Response::new(ResponseId::new(), FormId::new(), AnswerMap::new());
        repo.save(&response).await.unwrap();
        assert_eq!(
            repo.find_by_id(response.id()).await.unwrap(),
            Some(response)
        );
        assert_eq!(repo.find_by_id(&ResponseId::new()).await.unwrap(), None);
    }
}
