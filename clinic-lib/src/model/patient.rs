//! Patient records

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use trellis::Value;
use trellis::table::{Field, TableAction, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientStatus::Active => write!(f, "Active"),
            PatientStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub last_visit: Option<NaiveDate>,
    pub status: PatientStatus,
}

impl Patient {
    /// Age in whole years on `today`.
    pub fn age(&self, today: NaiveDate) -> u32 {
        let years = today.year() - self.date_of_birth.year();
        let had_birthday = (today.month(), today.day())
            >= (self.date_of_birth.month(), self.date_of_birth.day());
        let age = if had_birthday { years } else { years - 1 };
        age.max(0) as u32
    }
}

impl TableRow for Patient {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

/// Columns of the patients table.
pub fn patient_fields() -> Vec<Field<Patient>> {
    vec![
        Field::new("name", "Name", |p: &Patient| p.name.as_str().into())
            .sortable()
            .width(22),
        Field::new("email", "Email", |p: &Patient| p.email.as_str().into()).width(28),
        Field::new("phone", "Phone", |p: &Patient| p.phone.as_str().into()).width(14),
        Field::new("date_of_birth", "Born", |p: &Patient| p.date_of_birth.into())
            .sortable()
            .width(10),
        Field::new("last_visit", "Last visit", |p: &Patient| p.last_visit.into())
            .sortable()
            .width(10)
            .cell(|value, _| match value {
                Value::Null => "never".to_string(),
                other => other.to_string(),
            }),
        Field::new("status", "Status", |p: &Patient| p.status.to_string().into())
            .sortable()
            .width(8),
    ]
}

/// Row actions of the patients table.
pub fn patient_actions() -> Vec<TableAction> {
    vec![
        TableAction::new("view", "View"),
        TableAction::new("book", "Book appointment"),
        TableAction::new("archive", "Archive").destructive(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(born: NaiveDate) -> Patient {
        Patient {
            id: 1,
            name: "Ada Byron".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            date_of_birth: born,
            last_visit: None,
            status: PatientStatus::Active,
        }
    }

    #[test]
    fn test_age_counts_birthday() {
        let p = patient(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap());
        assert_eq!(p.age(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), 34);
        assert_eq!(p.age(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), 35);
    }

    #[test]
    fn test_missing_visit_renders_never() {
        let fields = patient_fields();
        let last_visit = fields.iter().find(|f| f.key == "last_visit").unwrap();
        assert_eq!(last_visit.render(&patient(NaiveDate::MIN)), "never");
    }
}
