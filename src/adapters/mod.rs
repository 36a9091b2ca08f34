//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `analytics` - Per-form aggregation state (in-memory, serialized writes)
//! - `auth` - Bearer token validation (jwt, mock)
//! - `events` - Event bus (in-memory)
//! - `export` - Response export rendering (CSV)
//! - `http` - REST API (axum)
//! - `memory` - In-memory repositories
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `websocket` - Live analytics push (form-keyed rooms)

pub mod analytics;
pub mod auth;
pub mod events;
pub mod export;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;

pub use analytics::InMemoryAnalyticsStore;
pub use auth::{JwtSessionValidator, MockSessionValidator};
pub use events::InMemoryEventBus;
pub use export::CsvExportService;
pub use memory::{InMemoryFormRepository, InMemoryResponseRepository};
pub use postgres::{PostgresFormRepository, PostgresResponseRepository};
pub use websocket::{RoomManager, WebSocketEventBridge, WebSocketState};
