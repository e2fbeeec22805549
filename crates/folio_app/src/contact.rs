//! Contact form
//!
//! Local-only: a valid submission shows a confirmation for a few seconds,
//! then the form clears. Nothing is sent anywhere.

use std::time::Duration;
use thiserror::Error;

/// How long the confirmation stays up before the form resets
pub const CONFIRMATION_DURATION: Duration = Duration::from_millis(3000);

/// Fields of the contact form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Rejected submission
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not an email address")]
    InvalidEmail(String),

    #[error("a submission is already being confirmed")]
    AlreadySubmitted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    /// Confirmation showing since `at`
    Submitted { at: Duration },
}

#[derive(Debug)]
pub struct ContactForm {
    fields: ContactFields,
    status: FormStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactFields::default(),
            status: FormStatus::Editing,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Edit the fields; ignored while the confirmation is showing
    pub fn edit(&mut self, f: impl FnOnce(&mut ContactFields)) {
        if self.status == FormStatus::Editing {
            f(&mut self.fields);
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.status, FormStatus::Submitted { .. })
    }

    /// Validate the fields and show the confirmation
    pub fn submit(&mut self, now: Duration) -> Result<(), FormError> {
        if self.is_submitted() {
            return Err(FormError::AlreadySubmitted);
        }

        let fields = &self.fields;
        for (name, value) in [
            ("name", &fields.name),
            ("email", &fields.email),
            ("subject", &fields.subject),
            ("message", &fields.message),
        ] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }
        if !looks_like_email(&fields.email) {
            return Err(FormError::InvalidEmail(fields.email.clone()));
        }

        self.status = FormStatus::Submitted { at: now };
        tracing::debug!(subject = %self.fields.subject, "contact form submitted");
        Ok(())
    }

    /// Clear the form once the confirmation has been up long enough
    ///
    /// Returns true on the call that resets it.
    pub fn poll(&mut self, now: Duration) -> bool {
        let FormStatus::Submitted { at } = self.status else {
            return false;
        };
        if now.saturating_sub(at) < CONFIRMATION_DURATION {
            return false;
        }

        self.status = FormStatus::Editing;
        self.fields = ContactFields::default();
        true
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
