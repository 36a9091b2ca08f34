//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analytics;
pub mod form;
pub mod response;

pub use analytics::{
    ExportResponsesHandler, ExportResponsesQuery, GetAnalyticsHandler, GetAnalyticsQuery,
};
pub use form::{
    CreateFormCommand, CreateFormHandler, CreateFormResult, GetFormHandler, GetFormQuery,
    ListFormsHandler, ListFormsQuery, PublishFormCommand, PublishFormHandler, PublishFormResult,
    UpdateFormCommand, UpdateFormHandler, UpdateFormResult,
};
pub use response::{SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult};
