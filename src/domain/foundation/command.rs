//! Command infrastructure for the application handlers.
//!
//! Instead of each handler accepting `correlation_id`, `source`, and the
//! acting user as separate parameters, they accept a single
//! `CommandMetadata` struct that flows through to emitted events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
///
/// Carries tracing, correlation, and authentication context through the
/// command processing pipeline; propagated to emitted event envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command (required for authorization).
    pub user_id: UserId,

    /// Links related operations across a single user request.
    /// Generated at the API boundary if not provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "websocket").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with required user ID.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Sets the correlation id, generating one from the given prefix.
    pub fn with_correlation_id(mut self, prefix: impl Into<String>) -> Self {
        self.correlation_id = Some(format!("{}-{}", prefix.into(), Uuid::new_v4()));
        self
    }

    /// Sets the command source.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation id, if set.
    pub fn correlation_id(&self) -> Option<String> {
        self.correlation_id.clone()
    }

    /// Returns the command source, if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults_to_no_correlation() {
        let metadata = CommandMetadata::new(UserId::new("user-1").unwrap());
        assert!(metadata.correlation_id().is_none());
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_carries_prefix() {
        let metadata =
            CommandMetadata::new(UserId::new("user-1").unwrap()).with_correlation_id("http");
        let correlation = metadata.correlation_id().unwrap();
        assert!(correlation.starts_with("http-"));
    }

    #[test]
    fn source_is_preserved() {
        let metadata = CommandMetadata::new(UserId::new("user-1").unwrap()).with_source("api");
        assert_eq!(metadata.source(), Some("api"));
    }
}
