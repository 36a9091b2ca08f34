//! Conditional field visibility evaluation.
//!
//! A field with no `show_if` rule is always visible. A field with a rule is
//! visible iff the referenced field has an answer equal to the rule's value
//! under the referenced field's own equality semantics (see
//! [`ShowIfValue::matches`]).
//!
//! Evaluation is single-level and one-pass: the referenced field's own
//! visibility is never consulted, and no fixed-point iteration happens, so
//! cyclic rule graphs cannot loop at runtime. A field whose dependency chain
//! cannot be satisfied is simply never visible; cycle prevention happens at
//! publish time, not here.

use super::aggregate::Form;
use super::answer::AnswerMap;
use super::field::Field;

/// Evaluates whether `field` was presented to the respondent given the
/// submitted answer map.
pub fn visible(field: &Field, form: &Form, answers: &AnswerMap) -> bool {
    let Some(rule) = field.show_if() else {
        return true;
    };

    // Equality is typed by the *referenced* field. A rule pointing at a
    // field that no longer exists can never be satisfied.
    let Some(referenced) = form.field(&rule.field_id) else {
        return false;
    };

    match answers.get(&rule.field_id) {
        Some(answer) => rule.equals.matches(referenced.kind(), answer),
        None => false,
    }
}
