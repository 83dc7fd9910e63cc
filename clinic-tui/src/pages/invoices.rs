//! Invoices page.

use clinic_lib::mock;
use clinic_lib::model::types::Money;
use clinic_lib::model::{Invoice, invoice_actions, invoice_fields};
use trellis::table::TableEvent;

use super::{Listed, Outcome, TablePage};

pub type InvoicesPage = TablePage<Invoice>;

impl Listed for Invoice {
    fn status_label(&self) -> String {
        self.status.to_string()
    }
}

pub fn invoices_page(page_size: usize) -> InvoicesPage {
    TablePage::new(
        "Invoices",
        invoice_fields(),
        invoice_actions(),
        mock::invoices(),
        page_size,
    )
}

/// Sum of the visible invoices.
pub fn total(page: &InvoicesPage) -> Money {
    page.rows().iter().map(|invoice| invoice.amount).sum()
}

/// React to a table event of the invoices page.
pub fn handle(page: &mut InvoicesPage, event: TableEvent<String>) -> Option<Outcome> {
    match event {
        TableEvent::RowClicked(id) => page.get(&id).map(|i| Outcome::Info(details(i))),
        TableEvent::ActionInvoked { action, key } => match action.as_str() {
            "view" => page.get(&key).map(|i| Outcome::Info(details(i))),
            "remind" => page.get(&key).map(|i| {
                Outcome::Done(format!("Reminder sent to {} for {}", i.patient, i.id))
            }),
            "void" => {
                let (removed, _) = page.remove(&key);
                removed.map(|i| Outcome::Done(format!("Voided {}", i.id)))
            }
            other => {
                log::warn!("unhandled invoice action '{}'", other);
                None
            }
        },
        other => {
            log::debug!("invoices table: {:?}", other);
            None
        }
    }
}

fn details(invoice: &Invoice) -> String {
    format!(
        "{} · {} · {} · issued {} · due {} · {}",
        invoice.id, invoice.patient, invoice.amount, invoice.issued, invoice.due, invoice.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_and_total() {
        let mut page = invoices_page(10);
        let all = total(&page);

        page.filter_status(Some("overdue".into()));
        assert_eq!(page.rows().len(), 6);
        assert!(total(&page) < all);

        page.filter_status(None);
        assert_eq!(page.rows().len(), 30);
    }

    #[test]
    fn test_void_removes_invoice() {
        let mut page = invoices_page(10);
        let outcome = handle(
            &mut page,
            TableEvent::ActionInvoked {
                action: "void".into(),
                key: "INV-1003".into(),
            },
        );
        assert_eq!(outcome, Some(Outcome::Done("Voided INV-1003".into())));
        assert_eq!(page.rows().len(), 29);
    }
}
