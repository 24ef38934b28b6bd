//! Author model and derived projections

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display form `"{family_name}, {first_name}"`
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Formatted `"(birth - death)"` span with medium-length dates.
    /// A missing side renders empty; no dates at all yields an empty string.
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        let side = |d: Option<NaiveDate>| d.map(format_date_med).unwrap_or_default();
        format!(
            "({} - {})",
            side(self.date_of_birth),
            side(self.date_of_death)
        )
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Inline author expansion carried by book list rows and detail views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Author> for AuthorRef {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.display_name(),
        }
    }
}

/// Medium-length date rendering, e.g. "Oct 6, 1917"
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "Patrick".to_string(),
            family_name: "Rothfuss".to_string(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn display_name_is_family_comma_first() {
        assert_eq!(author(None, None).display_name(), "Rothfuss, Patrick");
    }

    #[test]
    fn lifespan_empty_without_dates() {
        assert_eq!(author(None, None).lifespan(), "");
    }

    #[test]
    fn lifespan_formats_both_sides() {
        let a = author(
            NaiveDate::from_ymd_opt(1917, 10, 6),
            NaiveDate::from_ymd_opt(1973, 3, 18),
        );
        assert_eq!(a.lifespan(), "(Oct 6, 1917 - Mar 18, 1973)");
    }

    #[test]
    fn lifespan_with_birth_only_leaves_death_blank() {
        let a = author(NaiveDate::from_ymd_opt(1973, 6, 6), None);
        assert_eq!(a.lifespan(), "(Jun 6, 1973 - )");
    }
}
