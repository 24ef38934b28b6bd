//! BookInstance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::author::format_date_med;
use super::book::BookRef;

/// Loan status of a physical copy. Exactly these four literals are
/// persisted; anything else is rejected at form validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstanceStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

/// Fixed option list handed to instance forms, in display order
pub const STATUS_OPTIONS: [InstanceStatus; 4] = [
    InstanceStatus::Maintenance,
    InstanceStatus::Available,
    InstanceStatus::Loaned,
    InstanceStatus::Reserved,
];

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "Available",
            InstanceStatus::Maintenance => "Maintenance",
            InstanceStatus::Loaned => "Loaned",
            InstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Default for InstanceStatus {
    fn default() -> Self {
        InstanceStatus::Maintenance
    }
}

impl FromStr for InstanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(InstanceStatus::Available),
            "Maintenance" => Ok(InstanceStatus::Maintenance),
            "Loaned" => Ok(InstanceStatus::Loaned),
            "Reserved" => Ok(InstanceStatus::Reserved),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

impl TryFrom<String> for InstanceStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
            .map_err(|_| format!("unknown instance status {:?}", s))
    }
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Medium-length due date, e.g. "Apr 2, 2026"
    pub fn due_back_formatted(&self) -> String {
        format_date_med(self.due_back)
    }

    /// ISO form of the due date, used to pre-fill date inputs
    pub fn due_back_iso(&self) -> String {
        self.due_back.format("%Y-%m-%d").to_string()
    }
}

/// Instance row with its book reference expanded, for lists and details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInstanceRow {
    pub id: Uuid,
    pub book: BookRef,
    pub imprint: String,
    pub status: InstanceStatus,
    pub due_back: NaiveDate,
}

impl BookInstanceRow {
    pub fn new(instance: &BookInstance, book: BookRef) -> Self {
        Self {
            id: instance.id,
            book,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_exact_literals() {
        for status in STATUS_OPTIONS {
            assert_eq!(status.as_str().parse::<InstanceStatus>(), Ok(status));
        }
        assert!("available".parse::<InstanceStatus>().is_err());
        assert!("Lost".parse::<InstanceStatus>().is_err());
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(InstanceStatus::default(), InstanceStatus::Maintenance);
    }

    #[test]
    fn option_list_starts_with_maintenance() {
        assert_eq!(STATUS_OPTIONS[0], InstanceStatus::Maintenance);
        assert_eq!(STATUS_OPTIONS.len(), 4);
    }
}
