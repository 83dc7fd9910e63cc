//! Dashboard pages.

mod appointments;
pub mod invoices;
pub mod patients;
mod table;

pub use appointments::AppointmentsPage;
pub use invoices::{InvoicesPage, invoices_page};
pub use patients::{PatientsPage, patients_page};
pub use table::{Listed, TablePage};

/// What the user should hear back after a page handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Something to show.
    Info(String),
    /// A change was made.
    Done(String),
    /// Open the appointments page to book a visit for a patient.
    Book { patient: String },
}
