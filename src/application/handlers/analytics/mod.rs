//! Analytics query handlers.

mod export_responses;
mod get_analytics;

pub use export_responses::{ExportResponsesHandler, ExportResponsesQuery};
pub use get_analytics::{GetAnalyticsHandler, GetAnalyticsQuery};
