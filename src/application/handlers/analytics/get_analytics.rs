//! GetAnalyticsHandler - Query handler for the live dashboard snapshot.

use std::sync::Arc;

use crate::domain::analytics::AnalyticsSnapshot;
use crate::domain::foundation::{FormId, UserId};
use crate::domain::form::FormError;
use crate::ports::{AnalyticsStore, FormRepository};

/// Query for a form's aggregated analytics.
#[derive(Debug, Clone)]
pub struct GetAnalyticsQuery {
    pub form_id: FormId,
    pub user_id: UserId,
}

/// Handler for fetching analytics snapshots.
pub struct GetAnalyticsHandler {
    forms: Arc<dyn FormRepository>,
    analytics: Arc<dyn AnalyticsStore>,
}

impl GetAnalyticsHandler {
    pub fn new(forms: Arc<dyn FormRepository>, analytics: Arc<dyn AnalyticsStore>) -> Self {
        Self { forms, analytics }
    }

    pub async fn handle(&self, query: GetAnalyticsQuery) -> Result<AnalyticsSnapshot, FormError> {
        let form = self
            .forms
            .find_by_id(&query.form_id)
            .await?
            .ok_or(FormError::NotFound(query.form_id))?;

        form.authorize(&query.user_id)?;

        Ok(self.analytics.snapshot(&form).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryAnalyticsStore, InMemoryFormRepository, InMemoryResponseRepository,
    };
    use crate::domain::foundation::{FieldId, ResponseId};
    use crate::domain::form::{AnswerMap, Field, FieldKind, Form};
    use crate::domain::response::Response;
    use crate::ports::ResponseRepository;

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn published_form() -> Form {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Survey",
            vec![Field::new(
                fid("color"),
                "Color",
                FieldKind::SingleChoice {
                    options: vec!["Red".to_string(), "Blue".to_string()],
                },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap();
        form.publish().unwrap();
        form
    }

    #[tokio::test]
    async fn snapshot_rebuilds_lazily_from_responses() {
        let forms = Arc::new(InMemoryFormRepository::new());
        let responses = Arc::new(InMemoryResponseRepository::new());
        let analytics = Arc::new(InMemoryAnalyticsStore::new(responses.clone()));
        let form = published_form();
        forms.save(&form).await.unwrap();

        // Responses persisted without ever touching the analytics store -
        // the snapshot must replay them.
        let mut answers = AnswerMap::new();
        answers.insert(fid("color"), "Red".into());
        responses
            .save(&Response::new(ResponseId::new(), *form.id(), answers))
            .await
            .unwrap();

        let handler = GetAnalyticsHandler::new(forms, analytics);
        let snapshot = handler
            .handle(GetAnalyticsQuery {
                form_id: *form.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.field_breakdown[&fid("color")].buckets["Red"], 1);
    }

    #[tokio::test]
    async fn non_owner_cannot_read_analytics() {
        let forms = Arc::new(InMemoryFormRepository::new());
        let responses = Arc::new(InMemoryResponseRepository::new());
        let analytics = Arc::new(InMemoryAnalyticsStore::new(responses));
        let form = published_form();
        forms.save(&form).await.unwrap();

        let handler = GetAnalyticsHandler::new(forms, analytics);
        let result = handler
            .handle(GetAnalyticsQuery {
                form_id: *form.id(),
                user_id: UserId::new("stranger").unwrap(),
            })
            .await;
        assert_eq!(result.unwrap_err(), FormError::Forbidden);
    }
}
