use std::cell::Cell;
use std::rc::Rc;

use yew::functional::Reducible;

use super::attachments::{select_attachments, AttachmentPolicy};
use super::models::{Attachment, ContactSubmission, Field, SubmitStatus, ValidationErrors};
use super::submit::{SubmissionError, Submitter};
use super::validation::validate;

/// Everything the contact form renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFormState {
    pub submission: ContactSubmission,
    pub errors: ValidationErrors,
    pub pending: bool,
    pub status: Option<SubmitStatus>,
    pub active_field: Option<Field>,
    /// Why files from the last selection were turned away.
    pub attachment_notices: Vec<String>,
}

/// In-flight flag shared by every submit callback of one form. Callbacks run
/// against the last rendered state, so this, not `pending`, decides whether a
/// request may leave.
#[derive(Debug, Default)]
pub struct SubmitGate {
    busy: Cell<bool>,
}

impl SubmitGate {
    pub fn try_acquire(&self) -> bool {
        !self.busy.replace(true)
    }

    pub fn release(&self) {
        self.busy.set(false);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

pub enum FormAction {
    Edit(Field, String),
    Focus(Option<Field>),
    SelectAttachments(Vec<Attachment>),
    RemoveAttachment(usize),
    SubmitRequested,
    SubmitFinished(Result<(), SubmissionError>),
    DismissStatus,
}

impl ContactFormState {
    pub fn edit(&mut self, field: Field, value: String) {
        self.submission.set_value(field, value);
    }

    pub fn focus(&mut self, field: Option<Field>) {
        self.active_field = field;
    }

    pub fn select_attachments(&mut self, candidates: Vec<Attachment>, policy: &AttachmentPolicy) {
        let (accepted, rejected) = select_attachments(policy, candidates);
        self.submission.attachments.extend(accepted);
        self.attachment_notices = rejected.iter().map(|r| r.to_string()).collect();
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.submission.attachments.len() {
            self.submission.attachments.remove(index);
        }
    }

    /// The snapshot `begin_submit` would hand out right now, without touching
    /// any state.
    pub fn ready_submission(&self) -> Option<ContactSubmission> {
        if self.pending || !validate(&self.submission).is_empty() {
            return None;
        }
        Some(self.submission.clone())
    }

    /// Takes the gate and returns the snapshot to send, or leaves the gate
    /// untouched when nothing should go out.
    pub fn claim_submission(&self, gate: &SubmitGate) -> Option<ContactSubmission> {
        let outgoing = self.ready_submission()?;
        gate.try_acquire().then_some(outgoing)
    }

    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.pending {
            return None;
        }
        self.status = None;
        self.errors = validate(&self.submission);
        if !self.errors.is_empty() {
            return None;
        }
        self.pending = true;
        Some(self.submission.clone())
    }

    pub fn finish_submit(&mut self, result: Result<(), SubmissionError>) {
        self.pending = false;
        match result {
            Ok(()) => {
                self.submission = ContactSubmission::default();
                self.errors = ValidationErrors::new();
                self.attachment_notices.clear();
                self.status = Some(SubmitStatus::Success);
            }
            Err(err) => {
                self.status = Some(SubmitStatus::Failure(err.to_string()));
            }
        }
    }

    pub fn dismiss_status(&mut self) {
        self.status = None;
    }

    /// Runs one full submit cycle against `submitter`. Returns `None` when
    /// nothing was sent.
    pub async fn submit_with(
        &mut self,
        submitter: &dyn Submitter,
    ) -> Option<Result<(), SubmissionError>> {
        let outgoing = self.begin_submit()?;
        let result = submitter.submit(&outgoing).await;
        self.finish_submit(result.clone());
        Some(result)
    }

    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Edit(field, value) => self.edit(field, value),
            FormAction::Focus(field) => self.focus(field),
            FormAction::SelectAttachments(candidates) => {
                self.select_attachments(candidates, &AttachmentPolicy::default())
            }
            FormAction::RemoveAttachment(index) => self.remove_attachment(index),
            FormAction::SubmitRequested => {
                self.begin_submit();
            }
            FormAction::SubmitFinished(result) => self.finish_submit(result),
            FormAction::DismissStatus => self.dismiss_status(),
        }
    }
}

impl Reducible for ContactFormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
