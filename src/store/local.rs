// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{BillStore, StoreError};
use crate::models::{Bill, CreatedBill, NewBillUpload};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;

const COLUMNS: &str = "id, email, type, name, date, amount, vat, pct, commentary, file_url, file_name, status";

/// Bills kept in the local SQLite database, receipts stored inline.
pub struct LocalStore<'c> {
    conn: &'c Connection,
}

impl<'c> LocalStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn receipt(&self, id: &str) -> Result<Option<(String, String, Vec<u8>)>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT file_name, mime, content FROM receipts WHERE bill_id=?1")?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => Ok(Some((r.get(0)?, r.get(1)?, r.get(2)?))),
            None => Ok(None),
        }
    }
}

fn decimal(s: Option<String>) -> Result<Option<Decimal>, StoreError> {
    match s {
        Some(v) => v
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| StoreError::Message(format!("invalid decimal '{}': {}", v, e))),
        None => Ok(None),
    }
}

fn bill_from_row(r: &Row<'_>) -> Result<Bill, StoreError> {
    let id: i64 = r.get(0)?;
    let status: String = r.get(11)?;
    Ok(Bill {
        id: id.to_string(),
        email: r.get(1)?,
        r#type: r.get(2)?,
        name: r.get(3)?,
        date: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
        amount: decimal(r.get(5)?)?,
        vat: decimal(r.get(6)?)?,
        pct: r.get(7)?,
        commentary: r.get(8)?,
        file_url: r.get(9)?,
        file_name: r.get(10)?,
        status: status
            .parse()
            .map_err(|e: anyhow::Error| StoreError::Message(e.to_string()))?,
    })
}

impl BillStore for LocalStore<'_> {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM bills ORDER BY id", COLUMNS))?;
        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(r) = rows.next()? {
            data.push(bill_from_row(r)?);
        }
        Ok(data)
    }

    fn create(&self, upload: NewBillUpload) -> Result<CreatedBill, StoreError> {
        let file = upload.file;
        self.conn.execute(
            "INSERT INTO bills(email, file_name, status) VALUES (?1, ?2, 'pending')",
            params![upload.email, file.name],
        )?;
        let id = self.conn.last_insert_rowid();
        let file_url = format!("local://receipts/{}/{}", id, file.name);
        self.conn.execute(
            "UPDATE bills SET file_url=?1 WHERE id=?2",
            params![file_url, id],
        )?;
        self.conn.execute(
            "INSERT INTO receipts(bill_id, file_name, mime, content) VALUES (?1, ?2, ?3, ?4)",
            params![id, file.name, file.mime, file.bytes],
        )?;
        Ok(CreatedBill {
            key: id.to_string(),
            file_url,
            file_name: Some(file.name),
        })
    }

    fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        let id: i64 = bill
            .id
            .parse()
            .map_err(|_| StoreError::not_found(format!("bill '{}'", bill.id)))?;
        let n = self.conn.execute(
            "UPDATE bills SET email=?1, type=?2, name=?3, date=?4, amount=?5, vat=?6, pct=?7,
                commentary=?8, file_url=?9, file_name=?10, status=?11
             WHERE id=?12",
            params![
                bill.email,
                bill.r#type,
                bill.name,
                bill.date,
                bill.amount.map(|d| d.to_string()),
                bill.vat.map(|d| d.to_string()),
                bill.pct,
                bill.commentary,
                bill.file_url,
                bill.file_name,
                bill.status.as_str(),
                id
            ],
        )?;
        if n == 0 {
            return Err(StoreError::not_found(format!("bill '{}'", bill.id)));
        }
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM bills WHERE id=?1", COLUMNS))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(r) => bill_from_row(r),
            None => Err(StoreError::not_found(format!("bill '{}'", bill.id))),
        }
    }
}
