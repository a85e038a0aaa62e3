//! Contact form state: field values, validation and the submit cycle.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::accessors::ContentService;
use crate::types::{CmsError, ContactSubmission};

/// A contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Campus,
    Program,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Campus,
        Field::Program,
        Field::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Campus => "campus",
            Field::Program => "program",
            Field::Message => "message",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown contact field: {s}"))
    }
}

/// Raw values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Campus => &self.campus,
            Field::Program => &self.program,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Campus => &mut self.campus,
            Field::Program => &mut self.program,
            Field::Message => &mut self.message,
        }
    }

    /// Check every field, returning one message per invalid field.
    pub fn validate(&self) -> Result<ContactSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert(Field::Email, "Email is required".to_string());
        } else if !is_email_shaped(&self.email) {
            errors.insert(Field::Email, "Email is invalid".to_string());
        }
        if self.phone.trim().is_empty() {
            errors.insert(Field::Phone, "Phone number is required".to_string());
        }
        if self.campus.trim().is_empty() {
            errors.insert(Field::Campus, "Please select a campus".to_string());
        }
        if self.message.trim().is_empty() {
            errors.insert(Field::Message, "Message is required".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let program = self.program.trim();
        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            campus: self.campus.trim().to_string(),
            program: (!program.is_empty()).then(|| program.to_string()),
            message: self.message.trim().to_string(),
        })
    }
}

/// Field-scoped validation messages.
pub type FieldErrors = BTreeMap<Field, String>;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email regex is valid"))
}

/// Loose shape check: something, `@`, something, `.`, something.
pub fn is_email_shaped(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Why a submission did not start.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,

    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
}

/// Message shown when the CMS rejects or never receives a submission.
pub const SUBMIT_FAILED_MESSAGE: &str =
    "There was an error submitting your form. Please try again.";

/// Contact form state machine.
///
/// Only one submission may be outstanding: [`begin_submit`](Self::begin_submit)
/// refuses while the status is [`SubmitStatus::Submitting`]. On success the
/// fields are cleared; on failure they are kept so the user can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub fields: ContactFields,
    pub errors: FieldErrors,
    pub status: SubmitStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: ContactFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Update one field and clear any error shown for it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
        self.errors.remove(&field);
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    /// Validate and enter the `Submitting` state.
    ///
    /// Returns the payload to send. Validation failures are recorded on the
    /// form and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }

        match self.fields.validate() {
            Ok(submission) => {
                self.errors.clear();
                self.status = SubmitStatus::Submitting;
                Ok(submission)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Record the outcome of the request started by `begin_submit`.
    pub fn finish_submit<T>(&mut self, outcome: &Result<T, CmsError>) {
        match outcome {
            Ok(_) => {
                self.fields = ContactFields::default();
                self.status = SubmitStatus::Succeeded;
            }
            Err(e) => {
                tracing::warn!("Contact form submission failed: {e}");
                self.status = SubmitStatus::Failed(SUBMIT_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Run a full submit cycle against `service`.
    pub async fn submit(&mut self, service: &ContentService) -> Result<&SubmitStatus, SubmitError> {
        let submission = self.begin_submit()?;
        let outcome = service.submit_contact(&submission).await;
        self.finish_submit(&outcome);
        Ok(&self.status)
    }

    /// Dismiss a success or error message.
    pub fn dismiss(&mut self) {
        if !self.is_submitting() {
            self.status = SubmitStatus::Idle;
        }
    }
}
