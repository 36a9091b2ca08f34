//! Response HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ResponseHandlers;
pub use routes::response_routes;
