#![forbid(unsafe_code)]

//! Error types for the page controller.
//!
//! Only two families exist: user-input validation failures, which the
//! controller surfaces as notifications, and configuration failures, which the
//! host reports once and then replaces with defaults.

use thiserror::Error;

/// Why a contact-form submission was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one of the three fields is empty or absent.
    #[error("contact form has empty fields")]
    MissingFields,
    /// The email field does not have the `local@domain.tld` shape.
    #[error("contact form email is malformed")]
    InvalidEmail,
}

/// Configuration could not be parsed or holds unusable values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timing `{name}` must be greater than zero")]
    ZeroTiming { name: &'static str },
    #[error("notification stack cap must be at least 1")]
    EmptyNotificationStack,
    #[error("contact template must contain the `{{project}}` placeholder")]
    MissingProjectPlaceholder,
    #[error("threshold `{name}` is out of range: {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
}
