//! Event bridge connecting domain events to WebSocket clients.
//!
//! Subscribes to accepted-response events and broadcasts a payloadless
//! `analytics.changed` signal to the room of the affected form. Clients
//! react by re-fetching the analytics snapshot over HTTP.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, FormId};
use crate::ports::{EventHandler, EventSubscriber};

use super::messages::AnalyticsNotice;
use super::rooms::RoomManager;

/// Event types that invalidate a form's analytics view.
pub const ANALYTICS_EVENT_TYPES: &[&str] = &["response.accepted.v1"];

/// Bridge between the event bus and WebSocket rooms.
pub struct WebSocketEventBridge {
    room_manager: Arc<RoomManager>,
}

impl WebSocketEventBridge {
    /// Create a new event bridge with the given room manager.
    pub fn new(room_manager: Arc<RoomManager>) -> Self {
        Self { room_manager }
    }

    /// Create as an Arc (for sharing with an event subscriber).
    pub fn new_shared(room_manager: Arc<RoomManager>) -> Arc<Self> {
        Arc::new(Self::new(room_manager))
    }

    /// Register this bridge with an event subscriber.
    pub fn register(self: &Arc<Self>, subscriber: &impl EventSubscriber) {
        subscriber.subscribe_all(ANALYTICS_EVENT_TYPES, self.clone());
    }
}

#[async_trait]
impl EventHandler for WebSocketEventBridge {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        // Events on this bus use the form id as aggregate id.
        let form_id: FormId = event.aggregate_id.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Event aggregate_id is not a form id: {}", event.aggregate_id),
            )
        })?;

        let notice = AnalyticsNotice {
            form_id,
            timestamp: event.occurred_at,
            correlation_id: event.metadata.correlation_id.clone(),
        };

        self.room_manager.broadcast_to_form(&form_id, notice).await;
        tracing::trace!(form_id = %form_id, "analytics invalidation broadcast");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "WebSocketEventBridge"
    }
}
