//! Form module - schema model, visibility, validation, publication.
//!
//! The form aggregate owns the ordered field sequence and the publication
//! state machine. `visibility` and `validation` are the pure functions every
//! caller (submission path, aggregator, exporter) must agree on.

mod aggregate;
mod answer;
mod errors;
mod events;
mod field;
mod validation;
mod visibility;

pub use aggregate::{Form, MAX_TITLE_LENGTH, PLACEHOLDER_LABEL, PLACEHOLDER_TITLE};
pub use answer::{AnswerMap, AnswerValue};
pub use errors::FormError;
pub use events::{FormPublished, ResponseAccepted};
pub use field::{
    Field, FieldKind, ShowIf, ShowIfValue, DEFAULT_RATING_MAX, DEFAULT_RATING_MIN,
};
pub use validation::{validate, ResponseViolation, ViolationKind};
pub use visibility::visible;
