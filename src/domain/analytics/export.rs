//! Tabular export of accepted responses.
//!
//! Builds the logical table (header + one row per response) that the CSV
//! adapter serializes. Column policy mirrors aggregation exactly: PII fields
//! are excluded through the same `Field::is_pii` predicate, and a value that
//! was hidden at submission time is blanked through the same visibility
//! re-derivation the aggregator uses.

use crate::domain::form::{visible, AnswerValue, Form};
use crate::domain::response::Response;

use super::state::bucket_key;

/// Separator between selections of a multi-select cell.
const SELECTION_SEPARATOR: &str = "; ";

/// Builds the export table: a header row, then one row per response.
///
/// Leading columns are the response id and submission time; the remaining
/// columns are the non-PII field labels in schema order.
pub fn build_rows(form: &Form, responses: &[Response]) -> Vec<Vec<String>> {
    let fields: Vec<_> = form.fields().iter().filter(|f| !f.is_pii()).collect();

    let mut rows = Vec::with_capacity(responses.len() + 1);

    let mut header = Vec::with_capacity(fields.len() + 2);
    header.push("response_id".to_string());
    header.push("submitted_at".to_string());
    header.extend(fields.iter().map(|f| f.label().to_string()));
    rows.push(header);

    for response in responses {
        let mut row = Vec::with_capacity(fields.len() + 2);
        row.push(response.id().to_string());
        row.push(response.submitted_at().to_rfc3339());
        for field in fields.iter().copied() {
            let cell = if visible(field, form, response.answers()) {
                response
                    .answers()
                    .get(field.id())
                    .map(render_cell)
                    .unwrap_or_default()
            } else {
                String::new()
            };
            row.push(cell);
        }
        rows.push(row);
    }

    rows
}

fn render_cell(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Selections(values) => values.join(SELECTION_SEPARATOR),
        AnswerValue::Number(n) => bucket_key(*n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FieldId, FormId, ResponseId, UserId};
    use crate::domain::form::{AnswerMap, Field, FieldKind, ShowIf, ShowIfValue};

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn form() -> Form {
        Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Survey",
            vec![
                Field::new(
                    fid("attended"),
                    "Attended?",
                    FieldKind::SingleChoice {
                        options: vec!["Yes".to_string(), "No".to_string()],
                    },
                    true,
                    None,
                )
                .unwrap(),
                Field::new(
                    fid("meal"),
                    "Meal choice",
                    FieldKind::MultiSelect {
                        options: vec!["Veg".to_string(), "Fish".to_string()],
                    },
                    false,
                    Some(ShowIf {
                        field_id: fid("attended"),
                        equals: ShowIfValue::Text("Yes".to_string()),
                    }),
                )
                .unwrap(),
                Field::new(fid("email"), "Email", FieldKind::Text { pii: true }, true, None)
                    .unwrap(),
                Field::new(
                    fid("score"),
                    "Score",
                    FieldKind::Rating { min: 1, max: 5 },
                    false,
                    None,
                )
                .unwrap(),
            ],
        )
        .unwrap()
    }

    fn response(form: &Form, pairs: &[(&str, AnswerValue)]) -> Response {
        let answers: AnswerMap = pairs.iter().map(|(id, v)| (fid(id), v.clone())).collect();
        Response::new(ResponseId::new(), *form.id(), answers)
    }

    #[test]
    fn header_excludes_pii_columns() {
        let form = form();
        let rows = build_rows(&form, &[]);
        assert_eq!(
            rows[0],
            vec!["response_id", "submitted_at", "Attended?", "Meal choice", "Score"]
        );
    }

    #[test]
    fn one_row_per_response_in_order() {
        let form = form();
        let responses = vec![
            response(&form, &[("attended", "No".into()), ("score", 3.into())]),
            response(
                &form,
                &[
                    ("attended", "Yes".into()),
                    (
                        "meal",
                        AnswerValue::Selections(vec!["Veg".to_string(), "Fish".to_string()]),
                    ),
                ],
            ),
        ];
        let rows = build_rows(&form, &responses);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][2], "No");
        assert_eq!(rows[1][4], "3");
        assert_eq!(rows[2][3], "Veg; Fish");
    }

    #[test]
    fn pii_values_never_reach_the_table() {
        let form = form();
        let responses = vec![response(
            &form,
            &[("attended", "No".into()), ("email", "person@example.com".into())],
        )];
        let rows = build_rows(&form, &responses);
        for row in &rows {
            assert!(row.iter().all(|cell| cell != "person@example.com"));
        }
    }

    #[test]
    fn hidden_at_submission_values_are_blanked() {
        let form = form();
        // "meal" was hidden (attended = No) but a stray value is present.
        let responses = vec![response(
            &form,
            &[
                ("attended", "No".into()),
                ("meal", AnswerValue::Selections(vec!["Veg".to_string()])),
            ],
        )];
        let rows = build_rows(&form, &responses);
        assert_eq!(rows[1][3], "");
    }
}
