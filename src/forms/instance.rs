//! Book instance form fields and validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{BookInstance, InstanceStatus};

use super::{collect_errors, parse_optional_date, sanitize, FieldError};

/// Raw submitted fields for instance create/update
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceSubmission {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: Option<String>,
}

/// Trimmed and escaped field set echoed back on validation failure
#[derive(Debug, Clone, Serialize, Validate)]
pub struct InstanceFields {
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    pub status: String,
    pub due_back: Option<String>,
}

const FIELD_ORDER: &[&str] = &["book", "imprint"];

impl InstanceSubmission {
    pub fn sanitize(&self) -> InstanceFields {
        InstanceFields {
            book: sanitize(&self.book),
            imprint: sanitize(&self.imprint),
            status: sanitize(&self.status),
            due_back: self.due_back.as_deref().map(sanitize),
        }
    }
}

/// Typed values recovered from an instance submission, alongside any
/// field errors. Both sides are produced so a partially-bad submission
/// still echoes sensible values.
#[derive(Debug)]
pub struct InstanceValidation {
    pub errors: Vec<FieldError>,
    pub status: InstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl InstanceFields {
    /// Collect required-field, status and date errors in one pass
    pub fn validate_fields(&self) -> InstanceValidation {
        let mut errors = collect_errors(self.validate(), FIELD_ORDER);

        // An empty status falls back to the default; only an unknown
        // literal is a validation failure.
        let status = if self.status.is_empty() {
            InstanceStatus::default()
        } else {
            self.status.parse().unwrap_or_else(|_| {
                errors.push(FieldError::new("status", "Invalid status"));
                InstanceStatus::default()
            })
        };

        let due_back = match parse_optional_date(self.due_back.as_deref()) {
            Ok(date) => date,
            Err(()) => {
                errors.push(FieldError::new("due_back", "Invalid date"));
                None
            }
        };

        InstanceValidation {
            errors,
            status,
            due_back,
        }
    }

    /// Echo form of a stored record, for pre-populating the update form
    pub fn from_record(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.as_str().to_string(),
            due_back: Some(instance.due_back_iso()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(due_back: Option<&str>) -> InstanceSubmission {
        InstanceSubmission {
            book: "b0000000-0000-0000-0000-000000000001".into(),
            imprint: "London Gollancz, 2014.".into(),
            status: "Available".into(),
            due_back: due_back.map(String::from),
        }
    }

    #[test]
    fn valid_submission_parses_status_and_date() {
        let v = submission(Some("2026-05-01")).sanitize().validate_fields();
        assert!(v.errors.is_empty());
        assert_eq!(v.status, InstanceStatus::Available);
        assert_eq!(v.due_back, NaiveDate::from_ymd_opt(2026, 5, 1));
    }

    #[test]
    fn absent_due_back_is_valid_and_none() {
        let v = submission(None).sanitize().validate_fields();
        assert!(v.errors.is_empty());
        assert_eq!(v.due_back, None);
    }

    #[test]
    fn malformed_due_back_is_a_date_error() {
        let v = submission(Some("not-a-date")).sanitize().validate_fields();
        assert_eq!(v.errors, vec![FieldError::new("due_back", "Invalid date")]);
    }

    #[test]
    fn empty_status_defaults_to_maintenance() {
        let mut s = submission(None);
        s.status = String::new();
        let v = s.sanitize().validate_fields();
        assert!(v.errors.is_empty());
        assert_eq!(v.status, InstanceStatus::Maintenance);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut s = submission(None);
        s.status = "Lost".into();
        let v = s.sanitize().validate_fields();
        assert!(v.errors.iter().any(|e| e.field == "status"));
    }

    #[test]
    fn missing_book_and_imprint_both_reported() {
        let s = InstanceSubmission {
            book: String::new(),
            imprint: "   ".into(),
            status: String::new(),
            due_back: None,
        };
        let v = s.sanitize().validate_fields();
        let fields: Vec<&str> = v.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["book", "imprint"]);
    }
}
