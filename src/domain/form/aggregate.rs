//! Form aggregate entity.
//!
//! A form owns its ordered field sequence. Field order is semantically
//! meaningful: it is both the display order and the tie-break order for
//! response validation errors.
//!
//! # Lifecycle
//!
//! Forms are created in `Draft` and edited through an explicit command set
//! (add/update/remove/duplicate/reorder/replace). Publishing is a one-way
//! transition that freezes the schema; every edit command fails with
//! `FormLocked` afterwards, before any persistence call is attempted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{
    FieldId, FormId, FormStatus, StateMachine, Timestamp, UserId, ValidationError,
};

use super::errors::FormError;
use super::field::{Field, FieldKind, ShowIfValue};

/// Maximum length for a form title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Editor placeholder titles/labels that do not count as real content
/// at publish time.
pub const PLACEHOLDER_TITLE: &str = "Untitled Form";
pub const PLACEHOLDER_LABEL: &str = "Question";

/// Form aggregate - an ordered, optionally conditional questionnaire.
///
/// # Invariants
///
/// - field ids are unique within the form
/// - every `show_if` references an existing field, never the field itself
/// - rating bounds satisfy `min <= max`
/// - once `Published`, the field sequence and field contents are immutable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Unique identifier for this form.
    id: FormId,

    /// User who owns this form.
    owner_id: UserId,

    /// Form title; checked for real content at publish time.
    title: String,

    /// Current lifecycle status.
    status: FormStatus,

    /// Ordered field sequence.
    fields: Vec<Field>,

    /// When the form was created.
    created_at: Timestamp,

    /// When the form was last updated.
    updated_at: Timestamp,
}

impl Form {
    /// Creates a new draft form.
    ///
    /// Drafts are deliberately lenient: titles and labels may still be
    /// placeholders. Only the structural field invariants (unique ids,
    /// resolvable visibility references) hold at all times.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` on duplicate field ids or dangling `show_if`
    ///   references, or a title over [`MAX_TITLE_LENGTH`]
    pub fn new(
        id: FormId,
        owner_id: UserId,
        title: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<Self, FormError> {
        let title = title.into();
        Self::validate_title_length(&title)?;
        Self::validate_fields(&fields)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            title,
            status: FormStatus::Draft,
            fields,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a form from persistence (no validation, no events).
    pub fn reconstitute(
        id: FormId,
        owner_id: UserId,
        title: String,
        status: FormStatus,
        fields: Vec<Field>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            status,
            fields,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &FormId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Fields in display (and validation tie-break) order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id() == id)
    }

    pub fn is_published(&self) -> bool {
        self.status == FormStatus::Published
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this form.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Validates that the user may manage this form.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), FormError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(FormError::Forbidden)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edit commands (draft only)
    // ─────────────────────────────────────────────────────────────────────

    /// Renames the form.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FormError> {
        self.ensure_mutable()?;
        let title = title.into();
        Self::validate_title_length(&title)?;
        self.title = title;
        self.touch();
        Ok(())
    }

    /// Appends a field to the end of the sequence.
    pub fn add_field(&mut self, field: Field) -> Result<(), FormError> {
        self.ensure_mutable()?;
        let mut next = self.fields.clone();
        next.push(field);
        Self::validate_fields(&next)?;
        self.fields = next;
        self.touch();
        Ok(())
    }

    /// Replaces the field with the same id.
    pub fn update_field(&mut self, field: Field) -> Result<(), FormError> {
        self.ensure_mutable()?;
        let position = self
            .fields
            .iter()
            .position(|f| f.id() == field.id())
            .ok_or_else(|| FormError::field_not_found(field.id().clone()))?;
        let mut next = self.fields.clone();
        next[position] = field;
        Self::validate_fields(&next)?;
        self.fields = next;
        self.touch();
        Ok(())
    }

    /// Removes a field.
    ///
    /// # Errors
    ///
    /// - `FieldNotFound` for an unknown id
    /// - `ValidationFailed` when another field's visibility rule still
    ///   references the field being removed
    pub fn remove_field(&mut self, field_id: &FieldId) -> Result<(), FormError> {
        self.ensure_mutable()?;
        if self.field(field_id).is_none() {
            return Err(FormError::field_not_found(field_id.clone()));
        }
        if let Some(dependent) = self
            .fields
            .iter()
            .find(|f| f.show_if().is_some_and(|rule| &rule.field_id == field_id))
        {
            return Err(FormError::validation(
                field_id.as_str(),
                format!(
                    "field is referenced by the visibility rule of '{}'",
                    dependent.label()
                ),
            ));
        }
        self.fields.retain(|f| f.id() != field_id);
        self.touch();
        Ok(())
    }

    /// Inserts a copy of a field (under a new id) directly after the source.
    pub fn duplicate_field(
        &mut self,
        source_id: &FieldId,
        new_id: FieldId,
    ) -> Result<(), FormError> {
        self.ensure_mutable()?;
        let position = self
            .fields
            .iter()
            .position(|f| f.id() == source_id)
            .ok_or_else(|| FormError::field_not_found(source_id.clone()))?;
        let copy = self.fields[position].with_id(new_id);
        let mut next = self.fields.clone();
        next.insert(position + 1, copy);
        Self::validate_fields(&next)?;
        self.fields = next;
        self.touch();
        Ok(())
    }

    /// Moves a field to a new position, preserving the order of the rest.
    pub fn reorder_field(
        &mut self,
        field_id: &FieldId,
        new_index: usize,
    ) -> Result<(), FormError> {
        self.ensure_mutable()?;
        let position = self
            .fields
            .iter()
            .position(|f| f.id() == field_id)
            .ok_or_else(|| FormError::field_not_found(field_id.clone()))?;
        if new_index >= self.fields.len() {
            return Err(FormError::validation(
                "position",
                format!("index {} out of bounds", new_index),
            ));
        }
        let field = self.fields.remove(position);
        self.fields.insert(new_index, field);
        self.touch();
        Ok(())
    }

    /// Replaces the whole field sequence (the editor's save surface).
    pub fn replace_fields(&mut self, fields: Vec<Field>) -> Result<(), FormError> {
        self.ensure_mutable()?;
        Self::validate_fields(&fields)?;
        self.fields = fields;
        self.touch();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Publication
    // ─────────────────────────────────────────────────────────────────────

    /// Transitions `Draft -> Published`.
    ///
    /// # Errors
    ///
    /// - `AlreadyPublished` when the form is already published
    /// - `SchemaInvalid` carrying every publish blocker as a human-readable
    ///   reason
    pub fn publish(&mut self) -> Result<(), FormError> {
        if self.is_published() {
            return Err(FormError::AlreadyPublished);
        }

        let blockers = self.publish_blockers();
        if !blockers.is_empty() {
            return Err(FormError::SchemaInvalid(blockers));
        }

        self.status = self
            .status
            .transition_to(FormStatus::Published)
            .map_err(|e| FormError::InvalidState(e.to_string()))?;
        self.touch();
        Ok(())
    }

    /// Collects every reason the form cannot be published yet.
    ///
    /// Empty means the form is publishable. Reasons are phrased for the
    /// form author.
    pub fn publish_blockers(&self) -> Vec<String> {
        let mut reasons = Vec::new();

        let title = self.title.trim();
        if title.is_empty() || title == PLACEHOLDER_TITLE {
            reasons.push("form title is required".to_string());
        }

        if self.fields.is_empty() {
            reasons.push("at least one field is required".to_string());
        } else if !self.fields.iter().any(|f| f.is_required()) {
            reasons.push("at least one field must be required".to_string());
        }

        for field in &self.fields {
            let label = field.label().trim();
            if label.is_empty() || label == PLACEHOLDER_LABEL {
                reasons.push(format!("field '{}' must have a proper label", field.id()));
            }

            match field.kind() {
                FieldKind::SingleChoice { options } | FieldKind::MultiSelect { options } => {
                    if options.is_empty() {
                        reasons.push(format!(
                            "choice field '{}' must have at least one option",
                            field.label()
                        ));
                    } else if options.iter().any(|opt| opt.trim().is_empty()) {
                        reasons.push(format!(
                            "all options of '{}' must have text",
                            field.label()
                        ));
                    }
                }
                FieldKind::Rating { min, max } => {
                    if min > max {
                        reasons.push(format!(
                            "rating bounds of '{}' are inverted",
                            field.label()
                        ));
                    }
                }
                FieldKind::Text { .. } => {}
            }

            if let Some(rule) = field.show_if() {
                match self.field(&rule.field_id) {
                    None => reasons.push(format!(
                        "visibility rule of '{}' references a missing field",
                        field.label()
                    )),
                    Some(referenced) => {
                        if !show_if_type_matches(&rule.equals, referenced.kind()) {
                            reasons.push(format!(
                                "visibility rule of '{}' does not match the answer type of '{}'",
                                field.label(),
                                referenced.label()
                            ));
                        }
                    }
                }
            }
        }

        if let Some(cycle_member) = self.find_show_if_cycle() {
            reasons.push(format!(
                "conditional visibility rules form a cycle through '{}'",
                cycle_member
            ));
        }

        reasons
    }

    /// Follows `show_if` edges (each field has at most one) looking for a
    /// cycle; returns a field id on the cycle if one exists.
    fn find_show_if_cycle(&self) -> Option<FieldId> {
        for start in &self.fields {
            let mut seen: HashSet<&FieldId> = HashSet::new();
            let mut current = start;
            while let Some(rule) = current.show_if() {
                if !seen.insert(current.id()) {
                    return Some(current.id().clone());
                }
                match self.field(&rule.field_id) {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_mutable(&self) -> Result<(), FormError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(FormError::Locked)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_title_length(title: &str) -> Result<(), FormError> {
        if title.len() > MAX_TITLE_LENGTH {
            return Err(FormError::validation(
                "title",
                format!("title exceeds {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(())
    }

    /// Structural invariants that hold for every draft save, not just at
    /// publish time: unique ids, resolvable visibility references.
    fn validate_fields(fields: &[Field]) -> Result<(), FormError> {
        let mut ids: HashSet<&FieldId> = HashSet::new();
        for field in fields {
            if !ids.insert(field.id()) {
                return Err(FormError::from(ValidationError::invalid_format(
                    "fields",
                    format!("duplicate field id '{}'", field.id()),
                )));
            }
        }
        for field in fields {
            if let Some(rule) = field.show_if() {
                if !ids.contains(&rule.field_id) {
                    return Err(FormError::from(ValidationError::invalid_format(
                        "show_if",
                        format!(
                            "field '{}' references unknown field '{}'",
                            field.id(),
                            rule.field_id
                        ),
                    )));
                }
            }
        }
        Ok(())
    }
}

fn show_if_type_matches(value: &ShowIfValue, referent: &FieldKind) -> bool {
    matches!(
        (value, referent),
        (ShowIfValue::Text(_), FieldKind::Text { .. })
            | (ShowIfValue::Text(_), FieldKind::SingleChoice { .. })
            | (ShowIfValue::Text(_), FieldKind::MultiSelect { .. })
            | (ShowIfValue::Number(_), FieldKind::Rating { .. })
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::form::field::ShowIf;

    fn fid(s: &str) -> FieldId {
        FieldId::new(s).unwrap()
    }

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn text_field(id: &str, label: &str, required: bool) -> Field {
        Field::new(fid(id), label, FieldKind::Text { pii: false }, required, None).unwrap()
    }

    fn choice_field(id: &str, label: &str, options: &[&str]) -> Field {
        Field::new(
            fid(id),
            label,
            FieldKind::SingleChoice {
                options: options.iter().map(|s| s.to_string()).collect(),
            },
            true,
            None,
        )
        .unwrap()
    }

    fn publishable_form() -> Form {
        Form::new(
            FormId::new(),
            owner(),
            "Event feedback",
            vec![
                choice_field("attended", "Did you attend?", &["Yes", "No"]),
                text_field("thoughts", "Your thoughts", false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_form_starts_as_draft() {
        let form = publishable_form();
        assert_eq!(form.status(), FormStatus::Draft);
        assert!(!form.is_published());
    }

    #[test]
    fn duplicate_field_ids_are_rejected() {
        let result = Form::new(
            FormId::new(),
            owner(),
            "Dup",
            vec![text_field("a", "A", false), text_field("a", "A again", false)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn dangling_show_if_reference_is_rejected() {
        let dependent = Field::new(
            fid("b"),
            "B",
            FieldKind::Text { pii: false },
            false,
            Some(ShowIf {
                field_id: fid("ghost"),
                equals: ShowIfValue::Text("x".to_string()),
            }),
        )
        .unwrap();
        let result = Form::new(FormId::new(), owner(), "Dangling", vec![dependent]);
        assert!(result.is_err());
    }

    #[test]
    fn publish_succeeds_for_valid_form() {
        let mut form = publishable_form();
        assert!(form.publish().is_ok());
        assert!(form.is_published());
    }

    #[test]
    fn publish_twice_is_rejected() {
        let mut form = publishable_form();
        form.publish().unwrap();
        assert_eq!(form.publish(), Err(FormError::AlreadyPublished));
    }

    #[test]
    fn publish_requires_real_title() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            PLACEHOLDER_TITLE,
            vec![choice_field("a", "A?", &["Yes"])],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("title")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_requires_at_least_one_field() {
        let mut form = Form::new(FormId::new(), owner(), "Empty", vec![]).unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("at least one field")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_requires_a_required_field() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Optional only",
            vec![text_field("a", "A", false)],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons
                    .iter()
                    .any(|r| r.contains("at least one field must be required")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn pii_field_counts_as_required_for_publish() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "PII only",
            vec![
                Field::new(fid("email"), "Email", FieldKind::Text { pii: true }, false, None)
                    .unwrap(),
            ],
        )
        .unwrap();
        assert!(form.publish().is_ok());
    }

    #[test]
    fn publish_rejects_optionless_choice_field() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "No options",
            vec![Field::new(
                fid("c"),
                "Pick one",
                FieldKind::SingleChoice { options: vec![] },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("at least one option")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_rejects_blank_option_text() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Blank option",
            vec![Field::new(
                fid("c"),
                "Pick one",
                FieldKind::SingleChoice {
                    options: vec!["Yes".to_string(), "  ".to_string()],
                },
                true,
                None,
            )
            .unwrap()],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("must have text")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_rejects_placeholder_labels() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Labels",
            vec![text_field("q", PLACEHOLDER_LABEL, true)],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("proper label")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_rejects_mistyped_visibility_rule() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Mistyped rule",
            vec![
                choice_field("a", "Pick", &["Yes", "No"]),
                Field::new(
                    fid("b"),
                    "Why",
                    FieldKind::Text { pii: false },
                    false,
                    Some(ShowIf {
                        field_id: fid("a"),
                        equals: ShowIfValue::Number(1.0),
                    }),
                )
                .unwrap(),
            ],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("answer type")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn publish_rejects_visibility_cycle() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Cycle",
            vec![
                Field::new(
                    fid("x"),
                    "X",
                    FieldKind::Text { pii: false },
                    true,
                    Some(ShowIf {
                        field_id: fid("y"),
                        equals: ShowIfValue::Text("go".to_string()),
                    }),
                )
                .unwrap(),
                Field::new(
                    fid("y"),
                    "Y",
                    FieldKind::Text { pii: false },
                    false,
                    Some(ShowIf {
                        field_id: fid("x"),
                        equals: ShowIfValue::Text("go".to_string()),
                    }),
                )
                .unwrap(),
            ],
        )
        .unwrap();
        match form.publish() {
            Err(FormError::SchemaInvalid(reasons)) => {
                assert!(reasons.iter().any(|r| r.contains("cycle")));
            }
            other => panic!("expected SchemaInvalid, got {:?}", other),
        }
    }

    #[test]
    fn edits_on_published_form_fail_with_form_locked() {
        let mut form = publishable_form();
        form.publish().unwrap();

        assert_eq!(form.set_title("New title"), Err(FormError::Locked));
        assert_eq!(
            form.add_field(text_field("extra", "Extra", false)),
            Err(FormError::Locked)
        );
        assert_eq!(form.remove_field(&fid("thoughts")), Err(FormError::Locked));
        assert_eq!(form.replace_fields(vec![]), Err(FormError::Locked));
        assert_eq!(FormError::Locked.code(), ErrorCode::FormLocked);
    }

    #[test]
    fn add_and_remove_field_in_draft() {
        let mut form = publishable_form();
        form.add_field(text_field("extra", "Extra", false)).unwrap();
        assert_eq!(form.fields().len(), 3);
        form.remove_field(&fid("extra")).unwrap();
        assert_eq!(form.fields().len(), 2);
    }

    #[test]
    fn remove_field_referenced_by_rule_is_rejected() {
        let mut form = Form::new(
            FormId::new(),
            owner(),
            "Linked",
            vec![
                choice_field("a", "Pick", &["Yes"]),
                Field::new(
                    fid("b"),
                    "Why",
                    FieldKind::Text { pii: false },
                    false,
                    Some(ShowIf {
                        field_id: fid("a"),
                        equals: ShowIfValue::Text("Yes".to_string()),
                    }),
                )
                .unwrap(),
            ],
        )
        .unwrap();
        assert!(form.remove_field(&fid("a")).is_err());
        // Removing the dependent first unblocks the referenced field.
        form.remove_field(&fid("b")).unwrap();
        form.remove_field(&fid("a")).unwrap();
        assert!(form.fields().is_empty());
    }

    #[test]
    fn duplicate_field_inserts_after_source() {
        let mut form = publishable_form();
        form.duplicate_field(&fid("attended"), fid("attended_copy"))
            .unwrap();
        let ids: Vec<&str> = form.fields().iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["attended", "attended_copy", "thoughts"]);
    }

    #[test]
    fn reorder_field_moves_to_new_position() {
        let mut form = publishable_form();
        form.reorder_field(&fid("thoughts"), 0).unwrap();
        let ids: Vec<&str> = form.fields().iter().map(|f| f.id().as_str()).collect();
        assert_eq!(ids, vec!["thoughts", "attended"]);
    }

    #[test]
    fn reorder_out_of_bounds_is_rejected() {
        let mut form = publishable_form();
        assert!(form.reorder_field(&fid("thoughts"), 9).is_err());
    }

    #[test]
    fn authorize_rejects_non_owner() {
        let form = publishable_form();
        assert!(form.authorize(&owner()).is_ok());
        assert_eq!(
            form.authorize(&UserId::new("someone-else").unwrap()),
            Err(FormError::Forbidden)
        );
    }
}
