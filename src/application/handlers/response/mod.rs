//! Response submission handlers.

mod submit_response;

pub use submit_response::{SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult};
