//! Author form fields and validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Author;

use super::{collect_errors, parse_optional_date, sanitize, FieldError};

/// Raw submitted fields for author create/update
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorSubmission {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
}

/// Trimmed and escaped field set echoed back on validation failure
#[derive(Debug, Clone, Serialize, Validate)]
pub struct AuthorFields {
    #[validate(length(min = 1, max = 100, message = "First name must be specified (max 100 characters)."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Family name must be specified (max 100 characters)."))]
    pub family_name: String,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

const FIELD_ORDER: &[&str] = &["first_name", "family_name"];

impl AuthorSubmission {
    pub fn sanitize(&self) -> AuthorFields {
        AuthorFields {
            first_name: sanitize(&self.first_name),
            family_name: sanitize(&self.family_name),
            date_of_birth: self.date_of_birth.as_deref().map(sanitize),
            date_of_death: self.date_of_death.as_deref().map(sanitize),
        }
    }
}

/// Typed dates recovered from an author submission plus collected errors
#[derive(Debug)]
pub struct AuthorValidation {
    pub errors: Vec<FieldError>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorFields {
    pub fn validate_fields(&self) -> AuthorValidation {
        let mut errors = collect_errors(self.validate(), FIELD_ORDER);

        let date_of_birth = match parse_optional_date(self.date_of_birth.as_deref()) {
            Ok(date) => date,
            Err(()) => {
                errors.push(FieldError::new("date_of_birth", "Invalid date of birth"));
                None
            }
        };
        let date_of_death = match parse_optional_date(self.date_of_death.as_deref()) {
            Ok(date) => date,
            Err(()) => {
                errors.push(FieldError::new("date_of_death", "Invalid date of death"));
                None
            }
        };

        AuthorValidation {
            errors,
            date_of_birth,
            date_of_death,
        }
    }

    pub fn from_record(author: &Author) -> Self {
        let iso = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(iso),
            date_of_death: author.date_of_death.map(iso),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_names_are_both_reported() {
        let v = AuthorSubmission {
            first_name: String::new(),
            family_name: " ".into(),
            date_of_birth: None,
            date_of_death: None,
        }
        .sanitize()
        .validate_fields();
        let fields: Vec<&str> = v.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "family_name"]);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let v = AuthorSubmission {
            first_name: "x".repeat(101),
            family_name: "Herbert".into(),
            date_of_birth: None,
            date_of_death: None,
        }
        .sanitize()
        .validate_fields();
        assert!(v.errors.iter().any(|e| e.field == "first_name"));
    }

    #[test]
    fn malformed_dates_reported_separately() {
        let v = AuthorSubmission {
            first_name: "Frank".into(),
            family_name: "Herbert".into(),
            date_of_birth: Some("1920-10-08".into()),
            date_of_death: Some("bad".into()),
        }
        .sanitize()
        .validate_fields();
        assert_eq!(v.date_of_birth, NaiveDate::from_ymd_opt(1920, 10, 8));
        assert_eq!(v.errors, vec![FieldError::new("date_of_death", "Invalid date of death")]);
    }
}
