//! In-memory implementation of AnalyticsStore.
//!
//! Holds one [`AnalyticsState`] per form behind a form-scoped async mutex:
//! concurrent submissions to the same form serialize their folds, so the
//! bucket increment and running-mean update always land as an atomic pair.
//! Reads clone the state under a brief lock (copy-on-read) and never hold
//! it while building the snapshot.
//!
//! State is derived, never authoritative. On a cache miss the store rebuilds
//! by replaying the persisted response history, which is why it holds the
//! response repository port.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::analytics::{AnalyticsSnapshot, AnalyticsState};
use crate::domain::foundation::{DomainError, FormId};
use crate::domain::form::{AnswerMap, Form};
use crate::ports::{AnalyticsStore, ResponseRepository};

type StateCell = Arc<Mutex<AnalyticsState>>;

/// In-memory analytics store keyed by form id.
pub struct InMemoryAnalyticsStore {
    responses: Arc<dyn ResponseRepository>,
    states: RwLock<HashMap<FormId, StateCell>>,
}

impl InMemoryAnalyticsStore {
    pub fn new(responses: Arc<dyn ResponseRepository>) -> Self {
        Self {
            responses,
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the form's state cell, rebuilding from the response history
    /// on a miss. The boolean is true when the cell was freshly rebuilt
    /// (and therefore already reflects every persisted response).
    async fn cell_or_rebuild(&self, form: &Form) -> Result<(StateCell, bool), DomainError> {
        if let Some(cell) = self.states.read().await.get(form.id()).cloned() {
            return Ok((cell, false));
        }

        // Rebuilds serialize on the map's write lock; the double-check
        // prevents a racing rebuild from overwriting a newer state.
        let mut states = self.states.write().await;
        if let Some(cell) = states.get(form.id()).cloned() {
            return Ok((cell, false));
        }

        let history = self.responses.find_by_form(form.id()).await?;
        let state = AnalyticsState::recompute(form, history.iter().map(|r| r.answers()));
        let cell: StateCell = Arc::new(Mutex::new(state));
        states.insert(*form.id(), cell.clone());
        Ok((cell, true))
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryAnalyticsStore {
    async fn apply_response(&self, form: &Form, answers: &AnswerMap) -> Result<(), DomainError> {
        let (cell, fresh) = self.cell_or_rebuild(form).await?;
        // A fresh rebuild replayed the persisted history, which already
        // includes the response being applied - folding again would double
        // count it.
        if !fresh {
            let mut state = cell.lock().await;
            state.apply(form, answers);
        }
        Ok(())
    }

    async fn snapshot(&self, form: &Form) -> Result<AnalyticsSnapshot, DomainError> {
        let (cell, _) = self.cell_or_rebuild(form).await?;
        let state = cell.lock().await.clone();
        Ok(state.snapshot(form))
    }

    async fn rebuild(&self, form: &Form, responses: &[AnswerMap]) -> Result<(), DomainError> {
        let state = AnalyticsState::recompute(form, responses.iter());
        self.states
            .write()
            .await
            .insert(*form.id(), Arc::new(Mutex::new(state)));
        Ok(())
    }

    async fn invalidate(&self, form_id: &FormId) -> Result<(), DomainError> {
        self.states.write().await.remove(form_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryResponseRepository;
    use crate::domain::foundation::{FieldId, ResponseId, UserId};
    use crate::domain::form::{Field, FieldKind};
    use crate::domain::response::Response;

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn rating_form() -> Form {
        Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Scores",
            vec![Field::new(
                fid("score"),
                "Score",
                FieldKind::Rating { min: 1, max: 10 },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap()
    }

    fn score_answers(value: i32) -> AnswerMap {
        let mut answers = AnswerMap::new();
        answers.insert(fid("score"), value.into());
        answers
    }

    fn store() -> (InMemoryAnalyticsStore, Arc<InMemoryResponseRepository>) {
        let responses = Arc::new(InMemoryResponseRepository::new());
        (InMemoryAnalyticsStore::new(responses.clone()), responses)
    }

    #[tokio::test]
    async fn apply_then_snapshot() {
        let (store, _responses) = store();
        let form = rating_form();

        store.apply_response(&form, &score_answers(7)).await.unwrap();
        store.apply_response(&form, &score_answers(9)).await.unwrap();

        let snapshot = store.snapshot(&form).await.unwrap();
        assert_eq!(snapshot.count, 2);
        assert!((snapshot.average_rating[&fid("score")] - 8.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn miss_rebuilds_from_history_without_double_count() {
        let (store, responses) = store();
        let form = rating_form();

        // Persist first, as the submit pipeline does, then fold.
        let response = Response::new(ResponseId::new(), *form.id(), score_answers(4));
        responses.save(&response).await.unwrap();
        store
            .apply_response(&form, response.answers())
            .await
            .unwrap();

        let snapshot = store.snapshot(&form).await.unwrap();
        assert_eq!(snapshot.count, 1);
        assert_eq!(snapshot.field_breakdown[&fid("score")].buckets["4"], 1);
    }

    #[tokio::test]
    async fn invalidate_forces_replay() {
        let (store, responses) = store();
        let form = rating_form();

        for value in [2, 6] {
            let response = Response::new(ResponseId::new(), *form.id(), score_answers(value));
            responses.save(&response).await.unwrap();
            store
                .apply_response(&form, response.answers())
                .await
                .unwrap();
        }

        let before = store.snapshot(&form).await.unwrap();
        store.invalidate(form.id()).await.unwrap();
        let after = store.snapshot(&form).await.unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn explicit_rebuild_replaces_state() {
        let (store, _responses) = store();
        let form = rating_form();
        store.apply_response(&form, &score_answers(1)).await.unwrap();

        store
            .rebuild(&form, &[score_answers(10), score_answers(8)])
            .await
            .unwrap();

        let snapshot = store.snapshot(&form).await.unwrap();
        assert_eq!(snapshot.count, 2);
        assert!((snapshot.average_rating[&fid("score")] - 9.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn concurrent_applies_serialize_per_form() {
        let (store, _responses) = store();
        let store = Arc::new(store);
        let form = Arc::new(rating_form());

        // Warm the cell so every task takes the apply path.
        store.apply_response(&form, &score_answers(5)).await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            let form = form.clone();
            tasks.push(tokio::spawn(async move {
                store.apply_response(&form, &score_answers(5)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let snapshot = store.snapshot(&form).await.unwrap();
        assert_eq!(snapshot.count, 51);
        assert_eq!(snapshot.field_breakdown[&fid("score")].buckets["5"], 51);
        // The bucket/mean pair stayed consistent under concurrency.
        assert!((snapshot.average_rating[&fid("score")] - 5.0).abs() < 1e-12);
    }
}
