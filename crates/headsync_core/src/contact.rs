//! Contact form validation and mail-link construction.
//!
//! # Responsibility
//! - Validate raw form input into a `ContactSubmission`.
//! - Build the `mailto:` link the client opens on submit.
//!
//! # Invariants
//! - A submission only exists for input that passed every field rule.
//! - This module never touches head state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Mailbox that receives contact submissions.
pub const CONTACT_EMAIL: &str = "ahmed.d.aldulaimi@gmail.com";
/// Subject used when the sender leaves it blank.
pub const DEFAULT_SUBJECT: &str = "General Inquiry";

// Lengths are in UTF-16 code units, matching the browser form rules.
const MIN_NAME_UNITS: usize = 2;
const MIN_MESSAGE_UNITS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

/// Raw form values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

/// Form field identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    /// User-facing validation message.
    pub fn message(self) -> &'static str {
        match self {
            Self::Name => "Please enter your full name.",
            Self::Email => "Please enter a valid email address.",
            Self::Message => "Please provide a brief message (min 10 chars).",
        }
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    pub fields: Vec<ContactField>,
}

impl ContactValidationError {
    pub fn has(&self, field: ContactField) -> bool {
        self.fields.contains(&field)
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let details = self
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.as_str(), field.message()))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "contact form is invalid: {details}")
    }
}

impl Error for ContactValidationError {}

impl ContactForm {
    /// Applies the field rules and returns the validated submission.
    pub fn validate(&self) -> Result<ContactSubmission, ContactValidationError> {
        let mut fields = Vec::new();
        if self.name.encode_utf16().count() < MIN_NAME_UNITS {
            fields.push(ContactField::Name);
        }
        if !EMAIL_RE.is_match(&self.email) {
            fields.push(ContactField::Email);
        }
        if self.message.encode_utf16().count() < MIN_MESSAGE_UNITS {
            fields.push(ContactField::Message);
        }
        if !fields.is_empty() {
            return Err(ContactValidationError { fields });
        }

        Ok(ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: self.subject.clone(),
            message: self.message.clone(),
        })
    }
}

impl ContactSubmission {
    /// Subject line, falling back to `DEFAULT_SUBJECT` when blank.
    pub fn subject(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|subject| !subject.trim().is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    /// Plain-text mail body.
    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }

    /// `mailto:` link addressed to `recipient`.
    pub fn mailto(&self, recipient: &str) -> String {
        format!(
            "mailto:{recipient}?subject={}&body={}",
            encode_uri_component(&format!("Contact: {}", self.subject())),
            encode_uri_component(&self.body())
        )
    }
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            other => encoded.push_str(&format!("%{other:02X}")),
        }
    }
    encoded
}
