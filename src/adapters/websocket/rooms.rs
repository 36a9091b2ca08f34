//! WebSocket room management for form-based message routing.
//!
//! Rooms are organized by form id, allowing targeted broadcast of
//! analytics invalidation signals to all dashboards watching one form.
//!
//! ```text
//! Room: form-123       Room: form-456
//! ├── client-a         ├── client-d
//! ├── client-b         └── client-e
//! └── client-c
//! ```
//!
//! When a response is accepted for form-123, only clients a, b, c are told.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::FormId;

use super::messages::AnalyticsNotice;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages WebSocket connection rooms organized by form.
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since broadcasts (reads) vastly
/// outnumber joins/leaves (writes). This allows concurrent broadcasts to
/// different rooms.
pub struct RoomManager {
    /// Map of form_id → broadcast sender for that room.
    rooms: RwLock<HashMap<FormId, broadcast::Sender<AnalyticsNotice>>>,

    /// Map of client_id → form_id for O(1) cleanup on disconnect.
    client_forms: RwLock<HashMap<ClientId, FormId>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with specified channel capacity.
    ///
    /// Larger capacities ride out submission bursts better at the cost of
    /// memory; slow clients past the buffer miss signals and recover on
    /// their next re-fetch.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_forms: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a form room.
    ///
    /// If the room doesn't exist, it's created automatically. Returns a
    /// receiver for analytics notices in that room.
    pub async fn join(
        &self,
        form_id: &FormId,
        client_id: ClientId,
    ) -> broadcast::Receiver<AnalyticsNotice> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(*form_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.client_forms.write().await.insert(client_id, *form_id);

        sender.subscribe()
    }

    /// Remove a client from their form room.
    ///
    /// If the room becomes empty, it's automatically cleaned up.
    pub async fn leave(&self, client_id: &ClientId) {
        let mut client_forms = self.client_forms.write().await;

        if let Some(form_id) = client_forms.remove(client_id) {
            let rooms = self.rooms.read().await;
            if let Some(sender) = rooms.get(&form_id) {
                if sender.receiver_count() == 0 {
                    drop(rooms);
                    self.rooms.write().await.remove(&form_id);
                }
            }
        }
    }

    /// Broadcast a notice to all clients in a form room.
    ///
    /// No-op when the room is empty.
    pub async fn broadcast_to_form(&self, form_id: &FormId, notice: AnalyticsNotice) {
        let rooms = self.rooms.read().await;

        if let Some(sender) = rooms.get(form_id) {
            // Ignore send errors (no receivers is OK)
            let _ = sender.send(notice);
        }
    }

    /// Count of connected clients in a specific room.
    pub async fn client_count(&self, form_id: &FormId) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(form_id).map(|s| s.receiver_count()).unwrap_or(0)
    }

    /// All active room IDs (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<FormId> {
        self.rooms.read().await.keys().cloned().collect()
    }

    /// Total count of connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_forms.read().await.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use std::sync::Arc;

    fn notice(form_id: FormId) -> AnalyticsNotice {
        AnalyticsNotice {
            form_id,
            timestamp: Timestamp::now(),
            correlation_id: None,
        }
    }

    #[tokio::test]
    async fn join_creates_room_if_not_exists() {
        let manager = RoomManager::with_default_capacity();
        let form_id = FormId::new();

        let _rx = manager.join(&form_id, ClientId::new()).await;

        assert_eq!(manager.active_rooms().await.len(), 1);
        assert_eq!(manager.client_count(&form_id).await, 1);
    }

    #[tokio::test]
    async fn broadcast_reaches_all_room_members() {
        let manager = Arc::new(RoomManager::with_default_capacity());
        let form_id = FormId::new();

        let mut rx1 = manager.join(&form_id, ClientId::new()).await;
        let mut rx2 = manager.join(&form_id, ClientId::new()).await;

        manager.broadcast_to_form(&form_id, notice(form_id)).await;

        assert_eq!(rx1.recv().await.unwrap().form_id, form_id);
        assert_eq!(rx2.recv().await.unwrap().form_id, form_id);
    }

    #[tokio::test]
    async fn broadcast_is_scoped_to_room() {
        let manager = RoomManager::with_default_capacity();
        let form_a = FormId::new();
        let form_b = FormId::new();

        let mut rx_a = manager.join(&form_a, ClientId::new()).await;
        let _rx_b = manager.join(&form_b, ClientId::new()).await;

        manager.broadcast_to_form(&form_b, notice(form_b)).await;

        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_cleans_up_empty_room() {
        let manager = RoomManager::with_default_capacity();
        let form_id = FormId::new();
        let client_id = ClientId::new();

        let rx = manager.join(&form_id, client_id.clone()).await;
        drop(rx);
        manager.leave(&client_id).await;

        assert!(manager.active_rooms().await.is_empty());
        assert_eq!(manager.total_client_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_to_empty_room_is_noop() {
        let manager = RoomManager::with_default_capacity();
        let form_id = FormId::new();
        manager.broadcast_to_form(&form_id, notice(form_id)).await;
    }
}
