//! Analytics module - incremental aggregation and export of responses.

mod export;
mod state;

pub use export::build_rows;
pub use state::{
    bucket_key, AnalyticsSnapshot, AnalyticsState, Distribution, RatingStat, SkippedField,
};
