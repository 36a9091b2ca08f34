//! Form HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FormHandlers;
pub use routes::form_routes;
