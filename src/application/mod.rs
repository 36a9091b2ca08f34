//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers
//! (read).

pub mod handlers;

pub use handlers::{
    // Form handlers
    CreateFormCommand, CreateFormHandler, CreateFormResult,
    GetFormHandler, GetFormQuery,
    ListFormsHandler, ListFormsQuery,
    PublishFormCommand, PublishFormHandler, PublishFormResult,
    UpdateFormCommand, UpdateFormHandler, UpdateFormResult,
    // Response handlers
    SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult,
    // Analytics handlers
    ExportResponsesHandler, ExportResponsesQuery,
    GetAnalyticsHandler, GetAnalyticsQuery,
};
