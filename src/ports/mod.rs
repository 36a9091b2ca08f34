//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `FormRepository` / `ResponseRepository` - aggregate persistence
//! - `AnalyticsStore` - per-form aggregation state (serialized writes)
//! - `EventPublisher` / `EventSubscriber` - domain event transport
//! - `SessionValidator` - bearer token validation (issuance stays external)
//! - `ExportService` - downloadable response exports

mod analytics_store;
mod event_publisher;
mod event_subscriber;
mod export_service;
mod form_repository;
mod response_repository;
mod session_validator;

pub use analytics_store::AnalyticsStore;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use export_service::{ExportArtifact, ExportService};
pub use form_repository::FormRepository;
pub use response_repository::ResponseRepository;
pub use session_validator::SessionValidator;
