use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use log::{error, info, warn};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{Blob, FormData};

use crate::config;

use super::models::{AttachmentBody, ContactSubmission, Field};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("mail endpoint answered with status {status}")]
    Status { status: u16 },
    #[error("could not encode submission: {0}")]
    Encode(String),
}

/// Delivers a validated submission. One call is one outbound request.
pub trait Submitter {
    fn submit<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> LocalBoxFuture<'a, Result<(), SubmissionError>>;
}

/// Injectable submitter for components. Two handles are equal when they
/// point at the same submitter.
#[derive(Clone)]
pub struct SubmitterHandle(pub Rc<dyn Submitter>);

impl SubmitterHandle {
    pub fn new(submitter: impl Submitter + 'static) -> Self {
        Self(Rc::new(submitter))
    }

    pub fn http() -> Self {
        Self::new(HttpSubmitter::from_config())
    }
}

impl PartialEq for SubmitterHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Serialize)]
struct EmailRequest<'a> {
    to: &'a str,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

impl<'a> EmailRequest<'a> {
    fn new(to: &'a str, submission: &'a ContactSubmission) -> Self {
        Self {
            to,
            name: &submission.name,
            email: &submission.email,
            subject: &submission.subject,
            message: &submission.message,
        }
    }
}

enum RequestBody<'a> {
    Json(EmailRequest<'a>),
    Multipart(FormData),
}

/// Any 2xx counts as delivered.
fn outcome_for_status(status: u16) -> Result<(), SubmissionError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SubmissionError::Status { status })
    }
}

pub fn attachment_part_name(index: usize) -> String {
    format!("attachment_{}", index)
}

pub struct HttpSubmitter {
    endpoint: String,
    recipient: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            recipient: recipient.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::contact_endpoint(), config::CONTACT_RECIPIENT)
    }

    fn encode_body<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> Result<RequestBody<'a>, SubmissionError> {
        if submission.has_attachments() {
            multipart_body(submission).map(RequestBody::Multipart)
        } else {
            Ok(RequestBody::Json(EmailRequest::new(&self.recipient, submission)))
        }
    }

    fn build_request(&self, submission: &ContactSubmission) -> Result<Request, SubmissionError> {
        let request = Request::post(&self.endpoint);
        match self.encode_body(submission)? {
            RequestBody::Multipart(form) => Ok(request.body(form)),
            RequestBody::Json(payload) => request
                .json(&payload)
                .map_err(|e| SubmissionError::Encode(e.to_string())),
        }
    }

    async fn send(&self, submission: &ContactSubmission) -> Result<(), SubmissionError> {
        let request = self.build_request(submission).map_err(|e| {
            error!("Failed to build contact request: {}", e);
            e
        })?;

        let response = request.send().await.map_err(|e| {
            error!("Contact request to {} failed: {}", self.endpoint, e);
            SubmissionError::Network(e.to_string())
        })?;

        let outcome = outcome_for_status(response.status());
        match &outcome {
            Ok(()) => info!(
                "Contact message delivered ({} attachment(s))",
                submission.attachments.len()
            ),
            Err(_) => warn!("Contact endpoint returned status: {}", response.status()),
        }
        outcome
    }
}

impl Submitter for HttpSubmitter {
    fn submit<'a>(
        &'a self,
        submission: &'a ContactSubmission,
    ) -> LocalBoxFuture<'a, Result<(), SubmissionError>> {
        self.send(submission).boxed_local()
    }
}

fn js_error(err: JsValue) -> SubmissionError {
    SubmissionError::Encode(format!("{:?}", err))
}

fn multipart_body(submission: &ContactSubmission) -> Result<FormData, SubmissionError> {
    let form = FormData::new().map_err(js_error)?;
    for field in Field::ALL {
        form.append_with_str(field.as_str(), submission.value(field))
            .map_err(js_error)?;
    }
    for (index, attachment) in submission.attachments.iter().enumerate() {
        let part = attachment_part_name(index);
        let appended = match &attachment.body {
            AttachmentBody::File(file) => {
                form.append_with_blob_and_filename(&part, file, &attachment.name)
            }
            AttachmentBody::Bytes(bytes) => {
                let blob = bytes_blob(bytes)?;
                form.append_with_blob_and_filename(&part, &blob, &attachment.name)
            }
        };
        appended.map_err(js_error)?;
    }
    Ok(form)
}

fn bytes_blob(bytes: &[u8]) -> Result<Blob, SubmissionError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    Blob::new_with_u8_array_sequence(&parts).map_err(js_error)
}
