//! Incremental analytics aggregation.
//!
//! `AnalyticsState` is a per-form accumulator fed one accepted response at a
//! time. It must stay replayable: `recompute` over the full response set and
//! a sequence of `apply` calls over the same responses produce identical
//! state (a required property, covered by a proptest in
//! `tests/analytics_equivalence.rs`).
//!
//! The aggregator re-derives field visibility itself instead of trusting
//! client-supplied presence: a stray answer for a field that was hidden at
//! submission time is never aggregated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::FieldId;
use crate::domain::form::{visible, AnswerMap, AnswerValue, Field, FieldKind, Form};

/// Bucketed counts for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub buckets: BTreeMap<String, u64>,
}

impl Distribution {
    fn increment(&mut self, key: impl Into<String>) {
        *self.buckets.entry(key.into()).or_insert(0) += 1;
    }

    /// Sum over all buckets. For single-choice fields this equals the number
    /// of responses that answered the field while visible; for multi-select
    /// fields it may exceed that count.
    pub fn total(&self) -> u64 {
        self.buckets.values().sum()
    }
}

/// Running mean for one rating field, kept as sum + count so no raw values
/// are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStat {
    sum: f64,
    answered: u64,
}

impl RatingStat {
    fn record(&mut self, value: f64) {
        self.sum += value;
        self.answered += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        if self.answered == 0 {
            None
        } else {
            Some(self.sum / self.answered as f64)
        }
    }

    pub fn answered(&self) -> u64 {
        self.answered
    }
}

/// Per-form analytics accumulator.
///
/// Derived state: never the source of truth, always reproducible by
/// replaying accepted responses through [`AnalyticsState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsState {
    count: u64,
    field_breakdown: BTreeMap<FieldId, Distribution>,
    rating_stats: BTreeMap<FieldId, RatingStat>,
    answered_counts: BTreeMap<FieldId, u64>,
}

impl AnalyticsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total accepted responses folded into this state.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Bucketed breakdown per field. PII fields never appear as keys.
    pub fn field_breakdown(&self) -> &BTreeMap<FieldId, Distribution> {
        &self.field_breakdown
    }

    /// Running rating stats per rating field.
    pub fn rating_stats(&self) -> &BTreeMap<FieldId, RatingStat> {
        &self.rating_stats
    }

    /// Responses that answered the field while it was visible.
    pub fn answered_count(&self, field_id: &FieldId) -> u64 {
        self.answered_counts.get(field_id).copied().unwrap_or(0)
    }

    /// Folds one accepted response into the state.
    ///
    /// Bucket increments and the rating mean update happen on the same
    /// `&mut self` pass; callers that share state across tasks must
    /// serialize `apply` calls per form (see the analytics store adapter).
    pub fn apply(&mut self, form: &Form, answers: &AnswerMap) {
        self.count += 1;

        for field in form.fields() {
            if field.is_pii() {
                continue;
            }
            if !visible(field, form, answers) {
                continue;
            }
            let Some(answer) = answers.get(field.id()).filter(|v| !v.is_blank()) else {
                continue;
            };
            self.record_answer(field, answer);
        }
    }

    /// Rebuilds state from scratch by replaying every accepted response.
    ///
    /// Produces exactly the state a sequence of `apply` calls would.
    pub fn recompute<'a, I>(form: &Form, responses: I) -> Self
    where
        I: IntoIterator<Item = &'a AnswerMap>,
    {
        let mut state = Self::new();
        for answers in responses {
            state.apply(form, answers);
        }
        state
    }

    fn record_answer(&mut self, field: &Field, answer: &AnswerValue) {
        match (field.kind(), answer) {
            (FieldKind::Text { .. }, AnswerValue::Text(_)) => {
                // Free text has no natural bucket key; it only feeds the
                // completion metrics.
                self.mark_answered(field.id());
            }
            (FieldKind::SingleChoice { .. }, AnswerValue::Text(value)) => {
                self.breakdown_mut(field.id()).increment(value.clone());
                self.mark_answered(field.id());
            }
            (FieldKind::MultiSelect { .. }, AnswerValue::Selections(values)) => {
                let distribution = self.breakdown_mut(field.id());
                for value in values {
                    distribution.increment(value.clone());
                }
                self.mark_answered(field.id());
            }
            (FieldKind::Rating { .. }, AnswerValue::Number(value)) => {
                self.breakdown_mut(field.id()).increment(bucket_key(*value));
                self.rating_stats
                    .entry(field.id().clone())
                    .or_default()
                    .record(*value);
                self.mark_answered(field.id());
            }
            // Shape mismatches should have been rejected by validation;
            // replaying legacy data they are treated as unanswered.
            _ => {}
        }
    }

    fn breakdown_mut(&mut self, field_id: &FieldId) -> &mut Distribution {
        self.field_breakdown.entry(field_id.clone()).or_default()
    }

    fn mark_answered(&mut self, field_id: &FieldId) {
        *self.answered_counts.entry(field_id.clone()).or_insert(0) += 1;
    }

    /// Builds the dashboard view model for this state.
    pub fn snapshot(&self, form: &Form) -> AnalyticsSnapshot {
        let average_rating = self
            .rating_stats
            .iter()
            .filter_map(|(id, stat)| stat.mean().map(|mean| (id.clone(), mean)))
            .collect();

        let most_common_answers = self
            .field_breakdown
            .iter()
            .filter_map(|(id, distribution)| {
                // BTreeMap iteration is key-ordered, so on ties the
                // lexicographically smallest bucket wins deterministically.
                distribution
                    .buckets
                    .iter()
                    .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                    .map(|(key, _)| (id.clone(), key.clone()))
            })
            .collect();

        let aggregated_fields: Vec<&Field> =
            form.fields().iter().filter(|f| !f.is_pii()).collect();

        let mut skipped_fields = Vec::with_capacity(aggregated_fields.len());
        let mut answered_total = 0u64;
        for field in &aggregated_fields {
            let answered = self.answered_count(field.id());
            answered_total += answered;
            let skip_count = self.count.saturating_sub(answered);
            let skip_rate = if self.count > 0 {
                skip_count as f64 / self.count as f64 * 100.0
            } else {
                0.0
            };
            skipped_fields.push(SkippedField {
                field_id: field.id().clone(),
                label: field.label().to_string(),
                skip_count,
                skip_rate,
            });
        }

        let slots = aggregated_fields.len() as u64 * self.count;
        let completion_rate = if slots > 0 {
            answered_total as f64 / slots as f64 * 100.0
        } else {
            0.0
        };

        AnalyticsSnapshot {
            count: self.count,
            field_breakdown: self.field_breakdown.clone(),
            average_rating,
            most_common_answers,
            skipped_fields,
            completion_rate,
        }
    }
}

/// Bucket key for a rating answer. Whole numbers render without a decimal
/// point ("4", not "4.0") to match the option-string keys in look and sort.
pub fn bucket_key(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Skip statistics for one non-PII field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedField {
    pub field_id: FieldId,
    pub label: String,
    pub skip_count: u64,
    pub skip_rate: f64,
}

/// Dashboard view model derived from an [`AnalyticsState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub count: u64,
    pub field_breakdown: BTreeMap<FieldId, Distribution>,
    pub average_rating: BTreeMap<FieldId, f64>,
    pub most_common_answers: BTreeMap<FieldId, String>,
    pub skipped_fields: Vec<SkippedField>,
    pub completion_rate: f64,
}
