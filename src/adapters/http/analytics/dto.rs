//! HTTP DTOs for analytics endpoints.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::analytics::{AnalyticsSnapshot, Distribution};

/// Aggregated analytics view for dashboards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub count: u64,
    pub field_breakdown: BTreeMap<String, DistributionDto>,
    pub average_rating: BTreeMap<String, f64>,
    pub most_common_answers: BTreeMap<String, String>,
    pub skipped_fields: Vec<SkippedFieldDto>,
    pub completion_rate: f64,
}

/// Bucketed counts for one field.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionDto {
    pub buckets: BTreeMap<String, u64>,
}

impl From<&Distribution> for DistributionDto {
    fn from(distribution: &Distribution) -> Self {
        Self {
            buckets: distribution.buckets.clone(),
        }
    }
}

/// Skip statistics for one field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedFieldDto {
    pub field_id: String,
    pub field_name: String,
    pub skip_count: u64,
    pub skip_rate: f64,
}

impl From<AnalyticsSnapshot> for AnalyticsResponse {
    fn from(snapshot: AnalyticsSnapshot) -> Self {
        Self {
            count: snapshot.count,
            field_breakdown: snapshot
                .field_breakdown
                .iter()
                .map(|(id, distribution)| (id.to_string(), DistributionDto::from(distribution)))
                .collect(),
            average_rating: snapshot
                .average_rating
                .iter()
                .map(|(id, mean)| (id.to_string(), *mean))
                .collect(),
            most_common_answers: snapshot
                .most_common_answers
                .iter()
                .map(|(id, answer)| (id.to_string(), answer.clone()))
                .collect(),
            skipped_fields: snapshot
                .skipped_fields
                .into_iter()
                .map(|skipped| SkippedFieldDto {
                    field_id: skipped.field_id.to_string(),
                    field_name: skipped.label,
                    skip_count: skipped.skip_count,
                    skip_rate: skipped.skip_rate,
                })
                .collect(),
            completion_rate: snapshot.completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::AnalyticsState;
    use crate::domain::foundation::{FieldId, FormId, UserId};
    use crate::domain::form::{AnswerMap, Field, FieldKind, Form};

    #[test]
    fn response_serializes_camel_case() {
        let form = Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Survey",
            vec![Field::new(
                FieldId::new("score").unwrap(),
                "Score",
                FieldKind::Rating { min: 1, max: 5 },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap();

        let mut state = AnalyticsState::new();
        let mut answers = AnswerMap::new();
        answers.insert(FieldId::new("score").unwrap(), 4.into());
        state.apply(&form, &answers);

        let dto = AnalyticsResponse::from(state.snapshot(&form));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["fieldBreakdown"]["score"]["buckets"]["4"], 1);
        assert_eq!(json["averageRating"]["score"], 4.0);
        assert!(json["completionRate"].as_f64().unwrap() > 99.0);
    }
}
