//! WebSocket adapters for live analytics updates.
//!
//! Pushes a payloadless "analytics changed" signal to dashboards watching
//! a form, scoped by form-keyed rooms.
//!
//! ```text
//! Event Bus ──► WebSocketEventBridge ──► RoomManager ──► connected clients
//!               (response.accepted)      (per-form rooms)
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Room management for form-based routing
//! - [`handler`] - Axum WebSocket upgrade handler
//! - [`event_bridge`] - Bridge between event bus and WebSocket rooms

pub mod event_bridge;
pub mod handler;
pub mod messages;
pub mod rooms;

pub use event_bridge::{WebSocketEventBridge, ANALYTICS_EVENT_TYPES};
pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{
    AnalyticsChangedMessage, AnalyticsNotice, ClientMessage, ConnectedMessage, ErrorMessage,
    PongMessage, ServerMessage,
};
pub use rooms::{ClientId, RoomManager};
