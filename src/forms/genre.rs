//! Genre form fields and validation

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Genre;

use super::{collect_errors, sanitize, FieldError};

/// Raw submitted fields for genre create/update
#[derive(Debug, Clone, Deserialize)]
pub struct GenreSubmission {
    #[serde(default)]
    pub name: String,
}

/// Trimmed and escaped field set echoed back on validation failure
#[derive(Debug, Clone, Serialize, Validate)]
pub struct GenreFields {
    #[validate(length(min = 3, max = 100, message = "Genre name must contain between 3 and 100 characters"))]
    pub name: String,
}

impl GenreSubmission {
    pub fn sanitize(&self) -> GenreFields {
        GenreFields {
            name: sanitize(&self.name),
        }
    }
}

impl GenreFields {
    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_errors(self.validate(), &["name"])
    }

    pub fn from_record(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_rejected() {
        let fields = GenreSubmission { name: "SF".into() }.sanitize();
        assert_eq!(fields.field_errors().len(), 1);
    }

    #[test]
    fn ordinary_name_accepted() {
        let fields = GenreSubmission { name: " Fantasy ".into() }.sanitize();
        assert!(fields.field_errors().is_empty());
        assert_eq!(fields.name, "Fantasy");
    }
}
