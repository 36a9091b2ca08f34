//! Response validation against a form schema.
//!
//! Fields are checked strictly in schema order and the first violation wins,
//! so identical input always yields the identical violation. Fields that are
//! not visible for the submitted answer map are never checked, even when
//! required.

use std::fmt;

use crate::domain::foundation::FieldId;

use super::aggregate::Form;
use super::answer::{AnswerMap, AnswerValue};
use super::field::{Field, FieldKind};
use super::visibility::visible;

/// Why a submitted answer map was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// A visible required field has no usable answer.
    MissingRequired,
    /// The answer's shape does not match the field's kind.
    TypeMismatch { expected: &'static str },
    /// A choice answer is not one of the declared options.
    UnknownOption { value: String },
    /// A rating answer lies outside the declared bounds.
    OutOfRange { min: i32, max: i32, actual: f64 },
}

/// First violation found while validating a response.
///
/// Carries the offending field's label so the message is meaningful to a
/// respondent who never sees field ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseViolation {
    pub field_id: FieldId,
    pub label: String,
    pub kind: ViolationKind,
}

impl ResponseViolation {
    fn new(field: &Field, kind: ViolationKind) -> Self {
        Self {
            field_id: field.id().clone(),
            label: field.label().to_string(),
            kind,
        }
    }
}

impl fmt::Display for ResponseViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => {
                write!(f, "missing required field: {}", self.label)
            }
            ViolationKind::TypeMismatch { expected } => {
                write!(f, "invalid {} for: {}", expected, self.label)
            }
            ViolationKind::UnknownOption { value } => {
                write!(f, "'{}' is not an option for: {}", value, self.label)
            }
            ViolationKind::OutOfRange { min, max, actual } => {
                write!(
                    f,
                    "rating {} out of range [{}, {}] for: {}",
                    actual, min, max, self.label
                )
            }
        }
    }
}

/// Validates a submitted answer map against the form schema.
///
/// Returns the first violation in schema order, or `Ok(())` when every
/// visible required field is answered and every present answer is
/// well-typed, option-valid, and in range. Answer keys that match no field
/// are ignored.
///
/// Callers must pass the schema actively published at submission time, never
/// a draft copy under concurrent edit.
pub fn validate(form: &Form, answers: &AnswerMap) -> Result<(), ResponseViolation> {
    for field in form.fields() {
        if !visible(field, form, answers) {
            continue;
        }

        let answer = answers.get(field.id()).filter(|v| !v.is_blank());

        let Some(answer) = answer else {
            if field.is_required() {
                return Err(ResponseViolation::new(field, ViolationKind::MissingRequired));
            }
            continue;
        };

        check_answer(field, answer)?;
    }
    Ok(())
}

fn check_answer(field: &Field, answer: &AnswerValue) -> Result<(), ResponseViolation> {
    match field.kind() {
        FieldKind::Text { .. } => match answer {
            AnswerValue::Text(_) => Ok(()),
            _ => Err(ResponseViolation::new(
                field,
                ViolationKind::TypeMismatch { expected: "text" },
            )),
        },
        FieldKind::SingleChoice { options } => match answer {
            AnswerValue::Text(value) => {
                if options.iter().any(|opt| opt == value) {
                    Ok(())
                } else {
                    Err(ResponseViolation::new(
                        field,
                        ViolationKind::UnknownOption {
                            value: value.clone(),
                        },
                    ))
                }
            }
            _ => Err(ResponseViolation::new(
                field,
                ViolationKind::TypeMismatch { expected: "choice" },
            )),
        },
        FieldKind::MultiSelect { options } => match answer {
            AnswerValue::Selections(values) => {
                for value in values {
                    if !options.iter().any(|opt| opt == value) {
                        return Err(ResponseViolation::new(
                            field,
                            ViolationKind::UnknownOption {
                                value: value.clone(),
                            },
                        ));
                    }
                }
                Ok(())
            }
            _ => Err(ResponseViolation::new(
                field,
                ViolationKind::TypeMismatch {
                    expected: "selections",
                },
            )),
        },
        FieldKind::Rating { min, max } => match answer {
            AnswerValue::Number(value) => {
                if *value < f64::from(*min) || *value > f64::from(*max) {
                    Err(ResponseViolation::new(
                        field,
                        ViolationKind::OutOfRange {
                            min: *min,
                            max: *max,
                            actual: *value,
                        },
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Err(ResponseViolation::new(
                field,
                ViolationKind::TypeMismatch { expected: "rating" },
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FormId, UserId};
    use crate::domain::form::field::{ShowIf, ShowIfValue};

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    /// The §8 example schema: A = single_choice[Yes,No]; B = text, required,
    /// shown only when A is "Yes".
    fn branching_form() -> Form {
        Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Feedback",
            vec![
                Field::new(
                    fid("a"),
                    "Did you attend?",
                    FieldKind::SingleChoice {
                        options: vec!["Yes".to_string(), "No".to_string()],
                    },
                    true,
                    None,
                )
                .unwrap(),
                Field::new(
                    fid("b"),
                    "What did you think?",
                    FieldKind::Text { pii: false },
                    true,
                    Some(ShowIf {
                        field_id: fid("a"),
                        equals: ShowIfValue::Text("Yes".to_string()),
                    }),
                )
                .unwrap(),
            ],
        )
        .unwrap()
    }

    fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerMap {
        pairs.iter().map(|(id, v)| (fid(id), v.clone())).collect()
    }

    #[test]
    fn hidden_required_field_is_skipped() {
        let form = branching_form();
        let result = validate(&form, &answers(&[("a", "No".into())]));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn visible_required_field_must_be_answered() {
        let form = branching_form();
        let violation = validate(&form, &answers(&[("a", "Yes".into())])).unwrap_err();
        assert_eq!(violation.field_id, fid("b"));
        assert_eq!(violation.kind, ViolationKind::MissingRequired);
        assert_eq!(
            violation.to_string(),
            "missing required field: What did you think?"
        );
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let form = branching_form();
        let violation =
            validate(&form, &answers(&[("a", "Yes".into()), ("b", "".into())])).unwrap_err();
        assert_eq!(violation.field_id, fid("b"));
        assert_eq!(violation.kind, ViolationKind::MissingRequired);
    }

    #[test]
    fn satisfied_branch_validates() {
        let form = branching_form();
        let result = validate(
            &form,
            &answers(&[("a", "Yes".into()), ("b", "Great event".into())]),
        );
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn first_violation_wins_in_schema_order() {
        let form = Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Two required",
            vec![
                Field::new(fid("one"), "One", FieldKind::Text { pii: false }, true, None).unwrap(),
                Field::new(fid("two"), "Two", FieldKind::Text { pii: false }, true, None).unwrap(),
            ],
        )
        .unwrap();

        let violation = validate(&form, &AnswerMap::new()).unwrap_err();
        assert_eq!(violation.field_id, fid("one"));
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        let form = Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Rate",
            vec![Field::new(
                fid("r"),
                "Score",
                FieldKind::Rating { min: 1, max: 5 },
                false,
                None,
            )
            .unwrap()],
        )
        .unwrap();

        assert_eq!(validate(&form, &answers(&[("r", 1.into())])), Ok(()));
        assert_eq!(validate(&form, &answers(&[("r", 5.into())])), Ok(()));

        let violation = validate(&form, &answers(&[("r", 6.into())])).unwrap_err();
        assert_eq!(
            violation.kind,
            ViolationKind::OutOfRange {
                min: 1,
                max: 5,
                actual: 6.0
            }
        );
    }

    #[test]
    fn optional_unanswered_rating_is_fine() {
        let form = Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Rate",
            vec![Field::new(
                fid("r"),
                "Score",
                FieldKind::Rating { min: 1, max: 5 },
                false,
                None,
            )
            .unwrap()],
        )
        .unwrap();
        assert_eq!(validate(&form, &AnswerMap::new()), Ok(()));
    }

    #[test]
    fn choice_answer_must_be_declared_option() {
        let form = branching_form();
        let violation = validate(&form, &answers(&[("a", "Maybe".into())])).unwrap_err();
        assert_eq!(
            violation.kind,
            ViolationKind::UnknownOption {
                value: "Maybe".to_string()
            }
        );
    }

    #[test]
    fn selections_must_all_be_declared_options() {
        let form = Form::new(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            "Tags",
            vec![Field::new(
                fid("tags"),
                "Tags",
                FieldKind::MultiSelect {
                    options: vec!["Red".to_string(), "Blue".to_string()],
                },
                false,
                None,
            )
            .unwrap()],
        )
        .unwrap();

        let ok = validate(
            &form,
            &answers(&[(
                "tags",
                AnswerValue::Selections(vec!["Red".to_string(), "Blue".to_string()]),
            )]),
        );
        assert_eq!(ok, Ok(()));

        let violation = validate(
            &form,
            &answers(&[(
                "tags",
                AnswerValue::Selections(vec!["Red".to_string(), "Green".to_string()]),
            )]),
        )
        .unwrap_err();
        assert_eq!(
            violation.kind,
            ViolationKind::UnknownOption {
                value: "Green".to_string()
            }
        );
    }

    #[test]
    fn mistyped_answer_is_rejected() {
        let form = branching_form();
        let violation = validate(
            &form,
            &answers(&[("a", AnswerValue::Selections(vec!["Yes".to_string()]))]),
        )
        .unwrap_err();
        assert_eq!(
            violation.kind,
            ViolationKind::TypeMismatch { expected: "choice" }
        );
    }

    #[test]
    fn unknown_answer_keys_are_ignored() {
        let form = branching_form();
        let result = validate(
            &form,
            &answers(&[("a", "No".into()), ("ghost", "anything".into())]),
        );
        assert_eq!(result, Ok(()));
    }
}
