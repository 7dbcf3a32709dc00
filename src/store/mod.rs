// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seam for bills. The CLI talks to either a remote API
//! ([`HttpStore`]) or the local SQLite database ([`LocalStore`]).

mod http;
mod local;

pub use http::HttpStore;
pub use local::LocalStore;

use crate::models::{Bill, CreatedBill, NewBillUpload};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Erreur {code}")]
    Status { code: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::Status {
            code: 404,
            body: what.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::Status { code, .. } => Some(*code),
            StoreError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub trait BillStore {
    fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Persists the receipt and returns the key of the new partial bill.
    fn create(&self, upload: NewBillUpload) -> Result<CreatedBill, StoreError>;

    /// Replaces the stored record keyed by `bill.id`.
    fn update(&self, bill: &Bill) -> Result<Bill, StoreError>;
}
