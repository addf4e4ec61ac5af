//! Field-level validation shared by the booking and consent forms.
//!
//! Invalid input is never an error value here: checks collect a
//! [`FieldErrors`] map that is shown next to the offending fields.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const REQUIRED: &str = "This field is required";

/// Field path -> human readable message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field, replacing any earlier one
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Mark `field` as required when `value` is blank. Returns true when present.
    pub fn require(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.set(field, REQUIRED);
            false
        } else {
            true
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

static EMAIL: OnceLock<Regex> = OnceLock::new();
static UAE_PHONE: OnceLock<Regex> = OnceLock::new();

pub fn is_valid_email(value: &str) -> bool {
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(value.trim())
}

/// UAE numbers: optional +971 / 971 / 0 prefix, then a 2-9 digit and eight more digits
pub fn is_valid_uae_phone(value: &str) -> bool {
    UAE_PHONE
        .get_or_init(|| Regex::new(r"^(\+971|971|0)?[2-9][0-9]{8}$").expect("phone pattern compiles"))
        .is_match(value.trim())
}
