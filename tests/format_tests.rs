// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use billed::models::{mime_for, Bill, BillStatus, UploadFile};
use billed::utils::{format_date, format_status, parse_date};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn format_date_uses_short_french_months() {
    assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
    assert_eq!(format_date("2020-01-31").unwrap(), "31 Jan. 20");
    assert_eq!(format_date("2001-12-09").unwrap(), "9 Déc. 01");
}

#[test]
fn format_date_rejects_non_iso_values() {
    for bad in ["", "2021-8-1", "01/08/2021", "2021-02-30", "2021-08-01T10:00"] {
        assert!(format_date(bad).is_err(), "{bad}");
    }
    assert!(parse_date("2024-02-29").is_ok());
}

#[test]
fn status_labels() {
    assert_eq!(format_status(BillStatus::Pending), "En attente");
    assert_eq!(format_status(BillStatus::Accepted), "Accepté");
    assert_eq!(format_status(BillStatus::Refused), "Refusé");
}

#[test]
fn bill_accepts_wire_json_with_missing_fields() {
    let raw = r#"{
        "id": "47qAXb6fIm2zOKkLzMro",
        "vat": "80",
        "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg",
        "status": "pending",
        "type": "Hôtel et logement",
        "commentary": "séminaire billed",
        "name": "encore",
        "fileName": "preview-facture-free-201801-pdf-1.jpg",
        "date": "2004-04-04",
        "amount": 400,
        "email": "a@a",
        "pct": 20
    }"#;
    let bill: Bill = serde_json::from_str(raw).unwrap();
    assert_eq!(bill.amount, Some(Decimal::from(400)));
    assert_eq!(bill.vat, Some(Decimal::from(80)));
    assert_eq!(bill.r#type.as_deref(), Some("Hôtel et logement"));

    let partial: Bill = serde_json::from_str(r#"{"id": "k1", "email": "a@a"}"#).unwrap();
    assert_eq!(partial.date, "");
    assert_eq!(partial.status, BillStatus::Pending);
}

#[test]
fn upload_file_from_path_infers_mime() {
    let mut file = NamedTempFile::with_suffix(".JPG").unwrap();
    file.write_all(b"jpeg bytes").unwrap();
    file.flush().unwrap();

    let upload = UploadFile::from_path(file.path()).unwrap();
    assert_eq!(upload.mime, "image/jpeg");
    assert_eq!(upload.extension().as_deref(), Some("jpg"));
    assert_eq!(upload.bytes, b"jpeg bytes");
    assert_eq!(mime_for("notes.txt"), "text/plain");
}

#[test]
fn one_bad_record_does_not_spoil_the_list() {
    let raw = r#"[
        {"id": "a", "date": "2004-04-04", "amount": 400, "vat": "80"},
        {"id": "b", "date": null, "amount": "", "vat": "", "pct": "x", "status": "archived"},
        {"id": "c", "date": 20040404, "amount": "1e2", "type": 3}
    ]"#;
    let bills: Vec<Bill> = serde_json::from_str(raw).unwrap();
    assert_eq!(bills.len(), 3);

    assert_eq!(bills[1].date, "");
    assert_eq!(bills[1].amount, None);
    assert_eq!(bills[1].vat, None);
    assert_eq!(bills[1].pct, None);
    assert_eq!(bills[1].status, BillStatus::Pending);

    assert_eq!(bills[2].date, "20040404");
    assert_eq!(bills[2].amount, Some(Decimal::from(100)));
    assert_eq!(bills[2].r#type.as_deref(), Some("3"));
}
