// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use billed::models::{Bill, BillStatus, CreatedBill, NewBillUpload};
use billed::routes::{Navigator, Route};
use billed::store::{BillStore, StoreError};
use std::cell::{Cell, RefCell};
use std::sync::{Mutex, Once};

/// In-memory store whose calls can be made to fail.
#[derive(Default)]
pub struct ScriptedStore {
    pub bills: Vec<Bill>,
    pub list_error: Option<String>,
    pub create_error: Option<String>,
    /// Creates beyond this many fail with `Erreur 500`.
    pub creates_before_failure: Option<usize>,
    pub update_error: Option<String>,
    pub create_calls: Cell<usize>,
    pub update_calls: Cell<usize>,
    pub uploads: RefCell<Vec<NewBillUpload>>,
    pub updated: RefCell<Vec<Bill>>,
}

impl BillStore for ScriptedStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError> {
        match &self.list_error {
            Some(m) => Err(StoreError::Message(m.clone())),
            None => Ok(self.bills.clone()),
        }
    }

    fn create(&self, upload: NewBillUpload) -> Result<CreatedBill, StoreError> {
        self.create_calls.set(self.create_calls.get() + 1);
        if let Some(m) = &self.create_error {
            return Err(StoreError::Message(m.clone()));
        }
        let n = self.create_calls.get();
        if self.creates_before_failure.is_some_and(|limit| n > limit) {
            return Err(StoreError::Status {
                code: 500,
                body: String::new(),
            });
        }
        let created = CreatedBill {
            key: format!("key-{}", n),
            file_url: format!("https://localhost:3456/images/{}", upload.file.name),
            file_name: None,
        };
        self.uploads.borrow_mut().push(upload);
        Ok(created)
    }

    fn update(&self, bill: &Bill) -> Result<Bill, StoreError> {
        self.update_calls.set(self.update_calls.get() + 1);
        if let Some(m) = &self.update_error {
            return Err(StoreError::Message(m.clone()));
        }
        self.updated.borrow_mut().push(bill.clone());
        Ok(bill.clone())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: RefCell<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

pub fn bill(id: &str, date: &str, status: BillStatus) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        r#type: Some("Hôtel et logement".to_string()),
        name: Some(format!("bill {}", id)),
        date: date.to_string(),
        amount: Some(400.into()),
        vat: Some(80.into()),
        pct: Some(20),
        commentary: None,
        file_url: Some(format!("https://localhost:3456/images/{}.jpg", id)),
        file_name: Some(format!("{}.jpg", id)),
        status,
    }
}

static LOGS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut logs) = LOGS.lock() {
            logs.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Captured messages at `level` containing `needle`.
pub fn logged(level: log::Level, needle: &str) -> Vec<String> {
    LOGS.lock()
        .unwrap()
        .iter()
        .filter(|(l, m)| *l == level && m.contains(needle))
        .map(|(_, m)| m.clone())
        .collect()
}
