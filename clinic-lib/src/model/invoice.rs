//! Invoice records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trellis::table::{Alignment, Field, TableAction, TableRow};

use super::types::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Paid => write!(f, "Paid"),
            InvoiceStatus::Pending => write!(f, "Pending"),
            InvoiceStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

/// A bill issued to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice number, e.g. `INV-1001`.
    pub id: String,
    pub patient: String,
    pub issued: NaiveDate,
    pub due: NaiveDate,
    pub amount: Money,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Unpaid and past its due date on `today`.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        self.status != InvoiceStatus::Paid && self.due < today
    }
}

impl TableRow for Invoice {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Columns of the invoices table.
pub fn invoice_fields() -> Vec<Field<Invoice>> {
    vec![
        Field::new("id", "Invoice", |i: &Invoice| i.id.as_str().into())
            .sortable()
            .width(9),
        Field::new("patient", "Patient", |i: &Invoice| i.patient.as_str().into())
            .sortable()
            .width(22),
        Field::new("issued", "Issued", |i: &Invoice| i.issued.into())
            .sortable()
            .width(10),
        Field::new("due", "Due", |i: &Invoice| i.due.into())
            .sortable()
            .width(10),
        Field::new("amount", "Amount", |i: &Invoice| i.amount.into())
            .sortable()
            .width(10)
            .align(Alignment::Right)
            .cell(|_, i: &Invoice| i.amount.to_string()),
        Field::new("status", "Status", |i: &Invoice| i.status.to_string().into())
            .sortable()
            .width(8),
    ]
}

/// Row actions of the invoices table.
pub fn invoice_actions() -> Vec<TableAction> {
    vec![
        TableAction::new("view", "View"),
        TableAction::new("remind", "Send reminder"),
        TableAction::new("void", "Void").destructive(),
    ]
}
