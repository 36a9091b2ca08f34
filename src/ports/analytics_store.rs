//! Analytics store port.
//!
//! The per-form analytics state is the only shared mutable resource in the
//! system, so its contract is explicit about concurrency:
//!
//! - `apply_response` calls for the same form MUST be serialized by the
//!   implementation - the bucket increment and the running-mean update are
//!   an atomic pair, and interleaving two partial updates corrupts the mean.
//! - `snapshot` MUST NOT block writers beyond a brief copy: dashboards
//!   tolerate staleness of at most one in-flight response.
//! - State is derived, never authoritative: `rebuild` replays the full
//!   response set and must reproduce exactly what sequential applies built.

use async_trait::async_trait;

use crate::domain::analytics::AnalyticsSnapshot;
use crate::domain::foundation::{DomainError, FormId};
use crate::domain::form::{AnswerMap, Form};

/// Port for the per-form analytics accumulator.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Fold one accepted response into the form's state.
    ///
    /// Called once per accepted response, after persistence succeeds.
    async fn apply_response(&self, form: &Form, answers: &AnswerMap) -> Result<(), DomainError>;

    /// Copy-on-read snapshot of the form's current state.
    ///
    /// Implementations may lazily rebuild from the response history when no
    /// state is cached for the form.
    async fn snapshot(&self, form: &Form) -> Result<AnalyticsSnapshot, DomainError>;

    /// Rebuild the form's state from scratch by replaying `responses`.
    async fn rebuild(&self, form: &Form, responses: &[AnswerMap]) -> Result<(), DomainError>;

    /// Drop any cached state for the form.
    async fn invalidate(&self, form_id: &FormId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytics_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn AnalyticsStore) {}
    }
}
