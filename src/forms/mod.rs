//! Form reconciliation engine.
//!
//! Maps raw submitted form fields into validated field sets, collecting
//! every field error in one pass, and rebuilds the exact selection state
//! a rejected form needs to re-render. Pure logic; referential checks
//! against the store happen in the services.

pub mod author;
pub mod book;
pub mod genre;
pub mod instance;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationErrors;

use crate::models::Genre;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Flatten `validator` results into an ordered error list. The crate
/// collects errors into a map; `order` pins the field order shown to the
/// user regardless of map iteration.
pub fn collect_errors(result: Result<(), ValidationErrors>, order: &[&'static str]) -> Vec<FieldError> {
    let errors = match result {
        Ok(()) => return Vec::new(),
        Err(e) => e,
    };
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for &field in order {
        if let Some(field_errors) = by_field.get(field) {
            for e in *field_errors {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                out.push(FieldError { field, message });
            }
        }
    }
    out
}

/// Trim and HTML-escape a submitted free-text value. Escapes the same
/// character set as express-style sanitizers so echoed values are inert
/// in rendered markup.
pub fn sanitize(value: &str) -> String {
    escape_html(value.trim())
}

/// HTML-escape without trimming (for values where whitespace is data)
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Deserialize a field that may arrive absent, as a single value, or as an
/// array, always yielding a sequence. Pair with `#[serde(default)]` so a
/// missing field becomes an empty vec.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Parse an optional ISO-8601 calendar date. Absent or blank is a valid
/// `None`; a malformed value is an error, never a silent null.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, ()> {
    let raw = match value {
        None => return Ok(None),
        Some(v) => v.trim(),
    };
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Some).map_err(|_| ())
}

/// Genre catalog entry carrying its checkbox state for form re-render
#[derive(Debug, Clone, Serialize)]
pub struct CheckedGenre {
    pub id: uuid::Uuid,
    pub name: String,
    pub checked: bool,
}

/// Mark each catalog genre checked iff its identifier appears in the
/// submitted selection. Works identically for fresh create attempts and
/// pre-populated updates, and is idempotent under re-validation.
pub fn mark_checked(catalog: Vec<Genre>, selected: &[String]) -> Vec<CheckedGenre> {
    catalog
        .into_iter()
        .map(|genre| {
            let id_str = genre.id.to_string();
            CheckedGenre {
                checked: selected.iter().any(|s| s == &id_str),
                id: genre.id,
                name: genre.name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "one_or_many")]
        genre: Vec<String>,
    }

    #[test]
    fn one_or_many_absent_field_is_empty_sequence() {
        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(p.genre.is_empty());
    }

    #[test]
    fn one_or_many_scalar_becomes_single_element_sequence() {
        let p: Probe = serde_json::from_str(r#"{"genre": "abc"}"#).unwrap();
        assert_eq!(p.genre, vec!["abc".to_string()]);
    }

    #[test]
    fn one_or_many_array_passes_through() {
        let p: Probe = serde_json::from_str(r#"{"genre": ["a", "b"]}"#).unwrap();
        assert_eq!(p.genre, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn sanitize_trims_and_escapes() {
        assert_eq!(
            sanitize("  <script>alert('x')</script> "),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(sanitize("Dune & Foundation"), "Dune &amp; Foundation");
    }

    #[test]
    fn parse_optional_date_accepts_absent_and_blank() {
        assert_eq!(parse_optional_date(None), Ok(None));
        assert_eq!(parse_optional_date(Some("")), Ok(None));
        assert_eq!(parse_optional_date(Some("   ")), Ok(None));
    }

    #[test]
    fn parse_optional_date_rejects_malformed() {
        assert!(parse_optional_date(Some("not-a-date")).is_err());
        assert!(parse_optional_date(Some("2026-13-40")).is_err());
    }

    #[test]
    fn parse_optional_date_parses_iso() {
        let parsed = parse_optional_date(Some("2026-04-02")).unwrap();
        assert_eq!(parsed, chrono::NaiveDate::from_ymd_opt(2026, 4, 2));
    }

    #[test]
    fn mark_checked_is_exact_intersection() {
        let g1 = Genre { id: Uuid::new_v4(), name: "Fantasy".into() };
        let g2 = Genre { id: Uuid::new_v4(), name: "Mystery".into() };
        let selected = vec![g2.id.to_string(), Uuid::new_v4().to_string()];
        let marked = mark_checked(vec![g1.clone(), g2.clone()], &selected);
        assert!(!marked[0].checked);
        assert!(marked[1].checked);
    }

    #[test]
    fn mark_checked_idempotent_under_revalidation() {
        let g = Genre { id: Uuid::new_v4(), name: "Poetry".into() };
        let selected = vec![g.id.to_string()];
        let first: Vec<bool> = mark_checked(vec![g.clone()], &selected)
            .into_iter()
            .map(|c| c.checked)
            .collect();
        let second: Vec<bool> = mark_checked(vec![g], &selected)
            .into_iter()
            .map(|c| c.checked)
            .collect();
        assert_eq!(first, second);
    }
}
