//! Form command and query handlers.

mod create_form;
mod get_form;
mod list_forms;
mod publish_form;
mod update_form;

pub use create_form::{CreateFormCommand, CreateFormHandler, CreateFormResult};
pub use get_form::{GetFormHandler, GetFormQuery};
pub use list_forms::{ListFormsHandler, ListFormsQuery};
pub use publish_form::{PublishFormCommand, PublishFormHandler, PublishFormResult};
pub use update_form::{UpdateFormCommand, UpdateFormHandler, UpdateFormResult};
