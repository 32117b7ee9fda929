//! Explicit input validation.
//!
//! Every input type collects all of its rule violations into a
//! [`Violations`] list instead of stopping at the first one.
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::ModelError;
use crate::money;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").ok()
});

pub const EMAIL_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldViolation { field: field.to_string(), message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn extend(&mut self, other: Violations) {
        self.0.extend(other.0);
    }

    /// Required text: not blank, char count within `min..=max`.
    pub fn required_text(&mut self, field: &str, value: &str, min: usize, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "is required");
            return;
        }
        let n = value.chars().count();
        if n < min || n > max {
            self.push(field, format!("must be between {min} and {max} characters"));
        }
    }

    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(v) = value {
            if v.chars().count() > max {
                self.push(field, format!("cannot exceed {max} characters"));
            }
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
            return;
        }
        if value.chars().count() > EMAIL_MAX {
            self.push(field, format!("cannot exceed {EMAIL_MAX} characters"));
            return;
        }
        let ok = EMAIL_RE.as_ref().map(|re| re.is_match(value)).unwrap_or(false);
        if !ok {
            self.push(field, "must be a valid email address");
        }
    }

    pub fn positive_int(&mut self, field: &str, value: i32) {
        if value <= 0 {
            self.push(field, "must be positive");
        }
    }

    /// Money amount stored as NUMERIC(10,2).
    pub fn money(&mut self, field: &str, value: &Decimal) {
        if value.normalize().scale() > 2 {
            self.push(field, "must have at most 2 decimal places");
        } else if !money::in_range(value) {
            self.push(field, format!("must be less than {} in magnitude", money::LIMIT));
        }
    }

    pub fn positive_money(&mut self, field: &str, value: &Decimal) {
        if value <= &Decimal::ZERO {
            self.push(field, "must be positive");
            return;
        }
        self.money(field, value);
    }

    pub fn into_result(self) -> Result<(), ModelError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(self))
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|v| format!("{} {}", v.field, v.message)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl IntoIterator for Violations {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
