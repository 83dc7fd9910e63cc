//! Deterministic mock data
//!
//! The dashboard has no backend: every start builds the same records from
//! fixed tables. Appointments are laid out relative to the week of the date
//! passed in so the calendar always has something to show.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use trellis::calendar::CalendarEvent;

use crate::model::types::Money;
use crate::model::{Invoice, InvoiceStatus, Patient, PatientStatus, appointment};

const FIRST_NAMES: [&str; 8] = [
    "Amelia", "Benjamin", "Chloe", "Daniel", "Eleanor", "Felix", "Grace", "Hugo",
];

const LAST_NAMES: [&str; 3] = ["Whitfield", "Okafor", "Lindqvist"];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// 24 patients with ids `1..=24`.
pub fn patients() -> Vec<Patient> {
    let visits_from = date(2025, 1, 2);

    LAST_NAMES
        .iter()
        .flat_map(|last| FIRST_NAMES.iter().map(move |first| (*first, *last)))
        .enumerate()
        .map(|(i, (first, last))| {
            let n = i as u32;
            Patient {
                id: n + 1,
                name: format!("{} {}", first, last),
                email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
                phone: format!("555-01{:02}", n),
                date_of_birth: date(1950 + (n * 7 % 50) as i32, 1 + n * 5 % 12, 1 + n * 11 % 28),
                last_visit: (n % 5 != 4).then(|| visits_from + TimeDelta::days(i64::from(n * 9))),
                status: if n % 4 == 3 {
                    PatientStatus::Inactive
                } else {
                    PatientStatus::Active
                },
            }
        })
        .collect()
}

/// 30 invoices numbered from `INV-1001`, billed to the mock patients.
pub fn invoices() -> Vec<Invoice> {
    let patients = patients();
    let first_issue = date(2025, 1, 6);

    (0..30u32)
        .map(|n| {
            let issued = first_issue + TimeDelta::days(i64::from(n * 4));
            Invoice {
                id: format!("INV-{}", 1001 + n),
                patient: patients[n as usize % patients.len()].name.clone(),
                issued,
                due: issued + TimeDelta::days(30),
                amount: Money::from_cents(7_500 + i64::from(n * 3_700 % 42_000)),
                status: match n {
                    n if n % 5 == 0 => InvoiceStatus::Overdue,
                    n if n % 3 == 0 => InvoiceStatus::Pending,
                    _ => InvoiceStatus::Paid,
                },
            }
        })
        .collect()
}

/// `(weekday offset from Monday, hour, minute, minutes, title, category, tags)`
type Slot = (i64, u32, u32, i64, &'static str, &'static str, &'static [&'static str]);

const WEEK: [Slot; 14] = [
    (0, 9, 0, 30, "Amelia Whitfield", "Consultation", &["new-patient"]),
    (0, 9, 15, 30, "Benjamin Whitfield", "Follow-up", &[]),
    (0, 10, 0, 30, "Chloe Whitfield", "Consultation", &["insurance"]),
    (0, 14, 0, 90, "Daniel Whitfield", "Procedure", &["insurance"]),
    (1, 8, 30, 45, "Eleanor Whitfield", "Consultation", &["telehealth"]),
    (1, 11, 0, 30, "Felix Whitfield", "Emergency", &["urgent"]),
    (2, 9, 0, 60, "Grace Whitfield", "Procedure", &[]),
    (2, 9, 30, 30, "Hugo Whitfield", "Follow-up", &[]),
    (2, 9, 45, 45, "Amelia Okafor", "Consultation", &["new-patient", "insurance"]),
    (3, 13, 0, 30, "Benjamin Okafor", "Follow-up", &["telehealth"]),
    (3, 16, 30, 60, "Chloe Okafor", "Procedure", &["insurance"]),
    (4, 10, 0, 30, "Daniel Okafor", "Consultation", &[]),
    (4, 10, 0, 30, "Eleanor Okafor", "Emergency", &["urgent"]),
    (5, 9, 0, 120, "Felix Okafor", "Procedure", &["insurance"]),
];

/// Appointments for the week (Monday to Saturday) containing `today`.
///
/// Ids are stable (`appt-01`..); runtime-created events get UUIDs instead.
pub fn appointments(today: NaiveDate) -> Vec<CalendarEvent> {
    let monday = today - TimeDelta::days(i64::from(today.weekday().num_days_from_monday()));

    WEEK.iter()
        .enumerate()
        .map(|(i, &(day, hour, minute, minutes, title, category, tags))| {
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
            let start = (monday + TimeDelta::days(day)).and_time(time);
            appointment(format!("appt-{:02}", i + 1), title, start, minutes, category)
                .with_description(visit_note(category))
                .with_tags(tags.iter().copied())
        })
        .collect()
}

fn visit_note(category: &str) -> &'static str {
    match category {
        "Consultation" => "Review history and vitals",
        "Follow-up" => "Check progress since the last visit",
        "Procedure" => "Prepare the room and consent forms",
        "Emergency" => "Triage on arrival",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::{CATEGORIES, TAGS};

    #[test]
    fn test_mock_ids_are_unique() {
        let patients: HashSet<_> = patients().into_iter().map(|p| p.id).collect();
        let invoices: HashSet<_> = invoices().into_iter().map(|i| i.id).collect();
        assert_eq!(patients.len(), 24);
        assert_eq!(invoices.len(), 30);
    }

    #[test]
    fn test_mock_is_deterministic() {
        assert_eq!(patients(), patients());
        assert_eq!(invoices(), invoices());
    }

    #[test]
    fn test_appointments_land_in_the_week() {
        let wednesday = date(2025, 3, 12);
        let events = appointments(wednesday);

        assert_eq!(events.len(), WEEK.len());
        for event in &events {
            assert!(event.is_valid());
            assert!(event.date() >= date(2025, 3, 10) && event.date() <= date(2025, 3, 15));
            assert!(CATEGORIES.contains(&event.category.as_str()));
            assert!(event.tags.iter().all(|t| TAGS.contains(&t.as_str())));
            assert!(!event.description.is_empty());
        }
    }

    #[test]
    fn test_appointment_notes_are_searchable() {
        let events = appointments(date(2025, 3, 12));
        let found = crate::filter::search(&events, "consent");

        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|e| e.category == "Procedure"));
    }
}
