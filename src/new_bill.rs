// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bill, BillStatus, CreatedBill, NewBillUpload, Session, UploadFile};
use crate::routes::{Navigator, Route};
use crate::store::{BillStore, StoreError};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const DEFAULT_PCT: u32 = 20;

pub fn is_allowed_file(file: &UploadFile) -> bool {
    file.extension()
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// What the new-bill form shows besides its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub error_visible: bool,
    pub file_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub bill_id: String,
    pub file_url: String,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct FormValues {
    pub r#type: String,
    pub name: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub vat: Option<Decimal>,
    pub pct: Option<u32>,
    pub commentary: Option<String>,
}

#[derive(Debug)]
pub enum FileChange {
    Rejected { file_name: String },
    Uploaded(PendingUpload),
    Failed(StoreError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Bill),
    Failed(StoreError),
}

pub struct NewBillSubmitter<'a> {
    store: &'a dyn BillStore,
    navigator: &'a dyn Navigator,
    session: Session,
    pending: Option<PendingUpload>,
    form: FormState,
}

impl<'a> NewBillSubmitter<'a> {
    pub fn new(store: &'a dyn BillStore, navigator: &'a dyn Navigator, session: Session) -> Self {
        Self {
            store,
            navigator,
            session,
            pending: None,
            form: FormState::default(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn pending(&self) -> Option<&PendingUpload> {
        self.pending.as_ref()
    }

    pub fn handle_file_change(&mut self, file: UploadFile) -> FileChange {
        if !is_allowed_file(&file) {
            log::warn!(
                "rejected receipt '{}', allowed extensions: {}",
                file.name,
                ALLOWED_EXTENSIONS.join(", ")
            );
            self.form.error_visible = true;
            self.form.file_input = None;
            return FileChange::Rejected {
                file_name: file.name,
            };
        }
        self.form.error_visible = false;
        self.form.file_input = Some(file.name.clone());
        // a newer file always supersedes the previous upload
        self.pending = None;

        let local_name = file.name.clone();
        let upload = NewBillUpload {
            file,
            email: self.session.email.clone(),
        };
        match self.store.create(upload) {
            Ok(CreatedBill {
                key,
                file_url,
                file_name,
            }) => {
                let pending = PendingUpload {
                    bill_id: key,
                    file_url,
                    file_name: file_name.unwrap_or(local_name),
                };
                log::info!(
                    "uploaded receipt '{}' as bill {}",
                    pending.file_name,
                    pending.bill_id
                );
                self.pending = Some(pending.clone());
                FileChange::Uploaded(pending)
            }
            Err(e) => {
                log::error!("receipt upload failed: {}", e);
                FileChange::Failed(e)
            }
        }
    }

    /// Without a prior upload the bill goes out with an empty key and no
    /// receipt; the store decides whether to accept it.
    pub fn handle_submit(&mut self, values: FormValues) -> SubmitOutcome {
        let (id, file_url, file_name) = match self.pending.clone() {
            Some(p) => (p.bill_id, Some(p.file_url), Some(p.file_name)),
            None => {
                log::warn!("submitting bill without an uploaded receipt");
                (String::new(), None, None)
            }
        };
        let bill = Bill {
            id,
            email: self.session.email.clone(),
            r#type: Some(values.r#type),
            name: Some(values.name),
            date: values.date.to_string(),
            amount: Some(values.amount),
            vat: values.vat,
            pct: Some(values.pct.unwrap_or(DEFAULT_PCT)),
            commentary: values.commentary,
            file_url,
            file_name,
            status: BillStatus::Pending,
        };
        match self.store.update(&bill) {
            Ok(saved) => {
                log::info!("submitted bill {}", saved.id);
                self.pending = None;
                self.form = FormState::default();
                self.navigator.navigate(Route::Bills);
                SubmitOutcome::Submitted(saved)
            }
            Err(e) => {
                log::error!("bill submission failed: {}", e);
                SubmitOutcome::Failed(e)
            }
        }
    }
}
