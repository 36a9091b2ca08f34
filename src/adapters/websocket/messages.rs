//! WebSocket message types for live analytics updates.
//!
//! The protocol is deliberately thin: the server tells dashboards that a
//! form's analytics changed, with no payload - recipients re-fetch the
//! snapshot over HTTP. Delivery and retry guarantees are out of scope.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FormId, Timestamp};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established successfully.
    Connected(ConnectedMessage),

    /// The form's analytics changed; re-fetch the snapshot.
    #[serde(rename = "analytics.changed")]
    AnalyticsChanged(AnalyticsChangedMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent when a client successfully connects and joins a form room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub form_id: String,
    pub client_id: String,
    pub timestamp: String,
}

/// Invalidation signal - carries routing context only, never analytics data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsChangedMessage {
    pub form_id: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// Messages a client may send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,
}

// ============================================
// Internal room broadcast item
// ============================================

/// The item carried on a form room's broadcast channel.
#[derive(Debug, Clone)]
pub struct AnalyticsNotice {
    pub form_id: FormId,
    pub timestamp: Timestamp,
    pub correlation_id: Option<String>,
}

impl AnalyticsNotice {
    /// Renders the notice as the wire message.
    pub fn to_server_message(&self) -> ServerMessage {
        ServerMessage::AnalyticsChanged(AnalyticsChangedMessage {
            form_id: self.form_id.to_string(),
            timestamp: self.timestamp.to_rfc3339(),
            correlation_id: self.correlation_id.clone(),
        })
    }
}
