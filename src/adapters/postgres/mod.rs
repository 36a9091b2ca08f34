//! PostgreSQL adapters.

mod form_repository;
mod response_repository;

pub use form_repository::PostgresFormRepository;
pub use response_repository::PostgresResponseRepository;
