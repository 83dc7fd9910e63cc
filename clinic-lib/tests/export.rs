use clinic_lib::error::ExportError;
use clinic_lib::export::{ExportFormat, export_selected, require_selection};
use clinic_lib::mock;
use clinic_lib::model::{invoice_fields, patient_fields};

#[test]
fn test_empty_selection_is_refused() {
    let none: Vec<u32> = Vec::new();
    assert!(matches!(require_selection(none.as_slice()), Err(ExportError::NothingSelected)));

    let err = export_selected(&patient_fields(), &mock::patients(), &none, ExportFormat::Csv)
        .unwrap_err();
    assert_eq!(err.to_string(), "select items before exporting");
}

#[test]
fn test_csv_in_dataset_order() {
    let patients = mock::patients();
    let csv = export_selected(&patient_fields(), &patients, &[3, 1], ExportFormat::Csv).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Name,Email,Phone,Born,Last visit,Status");
    assert!(lines[1].starts_with("Amelia Whitfield,"));
    assert!(lines[2].starts_with("Chloe Whitfield,"));
}

#[test]
fn test_csv_uses_rendered_cells() {
    let invoices = mock::invoices();
    let csv = export_selected(
        &invoice_fields(),
        &invoices,
        &["INV-1001".to_string()],
        ExportFormat::Csv,
    )
    .unwrap();

    assert!(csv.lines().nth(1).unwrap().contains("$75.00"));
}

#[test]
fn test_json_export() {
    let invoices = mock::invoices();
    let json = export_selected(
        &invoice_fields(),
        &invoices,
        &["INV-1002".to_string()],
        ExportFormat::Json,
    )
    .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["id"], "INV-1002");
    assert_eq!(parsed[0]["status"], "Paid");
}
