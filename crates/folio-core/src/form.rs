#![forbid(unsafe_code)]

//! Contact form validation and the simulated submission feedback cycle.
//!
//! Validation happens before the browser's native submission. A valid attempt
//! is never blocked; the "sent" feedback that follows is driven by a fixed
//! delay and does not observe whether delivery actually succeeded.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// The three named contact fields. `None` means the field was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactFields {
    #[must_use]
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
        }
    }
}

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check field presence first, then the email shape.
///
/// Whitespace-only values count as present.
pub fn validate(fields: &ContactFields) -> Result<(), ValidationError> {
    let filled = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
    if !(filled(&fields.name) && filled(&fields.email) && filled(&fields.message)) {
        return Err(ValidationError::MissingFields);
    }
    match fields.email.as_deref() {
        Some(email) if is_valid_email(email) => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Submit control state across one attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Feedback is pending; `original_label` is restored when it completes.
    Sending { original_label: String },
}

impl SubmissionState {
    #[must_use]
    pub const fn is_sending(&self) -> bool {
        matches!(self, Self::Sending { .. })
    }

    /// Enter the sending state. Returns `false` if an attempt is already in
    /// flight.
    pub fn begin(&mut self, original_label: String) -> bool {
        if self.is_sending() {
            return false;
        }
        *self = Self::Sending { original_label };
        true
    }

    /// Leave the sending state, yielding the label to restore.
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Sending { original_label } => Some(original_label),
            Self::Idle => None,
        }
    }
}
