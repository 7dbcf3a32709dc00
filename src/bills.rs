// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bill, BillStatus};
use crate::routes::{Navigator, Route};
use crate::store::{BillStore, StoreError};
use crate::utils::{format_date, format_status, parse_date};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// A bill ready for display. `bill.date` is always the raw stored value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillView {
    #[serde(flatten)]
    pub bill: Bill,
    pub formatted_date: String,
    pub status_label: String,
    #[serde(skip)]
    pub parsed_date: Option<NaiveDate>,
}

impl BillView {
    pub fn from_bill(bill: Bill) -> Self {
        let status_label = format_status(bill.status).to_string();
        match format_date(&bill.date) {
            Ok(formatted_date) => Self {
                parsed_date: parse_date(&bill.date).ok(),
                formatted_date,
                status_label,
                bill,
            },
            Err(e) => {
                log::warn!("keeping raw date for bill {}: {:#}", bill.id, e);
                Self {
                    formatted_date: bill.date.clone(),
                    parsed_date: None,
                    status_label,
                    bill,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort by calendar date. Bills without a usable date go last.
pub fn sort_by_date(views: &mut [BillView], order: SortOrder) {
    views.sort_by(|a, b| match (a.parsed_date, b.parsed_date) {
        (Some(x), Some(y)) => match order {
            SortOrder::Ascending => x.cmp(&y),
            SortOrder::Descending => y.cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub struct BillsFetcher<'a> {
    store: &'a dyn BillStore,
    navigator: &'a dyn Navigator,
}

impl<'a> BillsFetcher<'a> {
    pub fn new(store: &'a dyn BillStore, navigator: &'a dyn Navigator) -> Self {
        Self { store, navigator }
    }

    /// One view per stored bill, in store order. Only a failure of the
    /// list call itself is an error.
    pub fn get_bills(&self) -> Result<Vec<BillView>, StoreError> {
        let bills = self.store.list()?;
        log::debug!("fetched {} bills", bills.len());
        Ok(bills.into_iter().map(BillView::from_bill).collect())
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }
}

pub fn update_status(
    store: &dyn BillStore,
    id: &str,
    status: BillStatus,
) -> Result<Bill, StoreError> {
    let mut bill = store
        .list()?
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| StoreError::not_found(format!("bill '{}'", id)))?;
    bill.status = status;
    let saved = store.update(&bill)?;
    log::info!("bill {} is now {}", id, status);
    Ok(saved)
}
