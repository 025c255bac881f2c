//! Contact form pipeline: field state, validation, attachment filtering and
//! delivery to the mail endpoint.

pub mod attachments;
pub mod form;
pub mod models;
pub mod submit;
pub mod validation;

pub use attachments::AttachmentPolicy;
pub use form::{ContactFormState, FormAction, SubmitGate};
pub use models::{Attachment, Field, SubmitStatus};
pub use submit::SubmitterHandle;
