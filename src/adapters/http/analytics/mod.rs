//! Analytics HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AnalyticsHandlers;
pub use routes::analytics_routes;
