//! Patients page.

use chrono::Local;
use clinic_lib::mock;
use clinic_lib::model::{Patient, patient_actions, patient_fields};
use trellis::table::TableEvent;

use super::{Listed, Outcome, TablePage};

pub type PatientsPage = TablePage<Patient>;

impl Listed for Patient {
    fn status_label(&self) -> String {
        self.status.to_string()
    }
}

pub fn patients_page(page_size: usize) -> PatientsPage {
    TablePage::new(
        "Patients",
        patient_fields(),
        patient_actions(),
        mock::patients(),
        page_size,
    )
}

/// React to a table event of the patients page.
pub fn handle(page: &mut PatientsPage, event: TableEvent<u32>) -> Option<Outcome> {
    match event {
        TableEvent::RowClicked(id) => page.get(&id).map(|p| Outcome::Info(details(p))),
        TableEvent::ActionInvoked { action, key } => match action.as_str() {
            "view" => page.get(&key).map(|p| Outcome::Info(details(p))),
            "book" => page.get(&key).map(|p| Outcome::Book {
                patient: p.name.clone(),
            }),
            "archive" => {
                let (removed, _) = page.remove(&key);
                removed.map(|p| Outcome::Done(format!("Archived {}", p.name)))
            }
            other => {
                log::warn!("unhandled patient action '{}'", other);
                None
            }
        },
        other => {
            log::debug!("patients table: {:?}", other);
            None
        }
    }
}

fn details(patient: &Patient) -> String {
    let today = Local::now().date_naive();
    format!(
        "{} (#{}) · {} years · {} · {} · {}",
        patient.name,
        patient.id,
        patient.age(today),
        patient.email,
        patient.phone,
        patient.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_removes_and_drops_selection() {
        let mut page = patients_page(5);
        page.update(trellis::table::TableCommand::ToggleRow(2));

        let outcome = handle(
            &mut page,
            TableEvent::ActionInvoked {
                action: "archive".into(),
                key: 2,
            },
        );

        assert_eq!(outcome, Some(Outcome::Done("Archived Benjamin Whitfield".into())));
        assert!(page.get(&2).is_none());
        assert!(page.selected().is_empty());
    }

    #[test]
    fn test_book_names_patient() {
        let mut page = patients_page(5);
        let outcome = handle(
            &mut page,
            TableEvent::ActionInvoked {
                action: "book".into(),
                key: 1,
            },
        );
        assert_eq!(
            outcome,
            Some(Outcome::Book {
                patient: "Amelia Whitfield".into()
            })
        );
    }
}
