// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::bills::{sort_by_date, update_status, BillView, BillsFetcher, SortOrder};
use crate::models::{BillStatus, UploadFile};
use crate::new_bill::{FileChange, FormValues, NewBillSubmitter, SubmitOutcome, ALLOWED_EXTENSIONS};
use crate::routes::Route;
use crate::store::BillStore;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, require_session};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::cell::Cell;
use std::path::Path;

pub fn handle(conn: &Connection, store: &dyn BillStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("new", sub)) => new_bill(conn, store, sub)?,
        Some(("status", sub)) => status(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn query_views(store: &dyn BillStore, order: SortOrder) -> Result<Vec<BillView>> {
    let nav = |route: Route| log::debug!("navigate to {}", route.path());
    let mut views = BillsFetcher::new(store, &nav)
        .get_bills()
        .context("Failed to fetch bills")?;
    sort_by_date(&mut views, order);
    Ok(views)
}

fn list(store: &dyn BillStore, sub: &clap::ArgMatches) -> Result<()> {
    let order = match sub.get_one::<String>("order").map(String::as_str) {
        Some("desc") => SortOrder::Descending,
        _ => SortOrder::Ascending,
    };
    let views = query_views(store, order)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        print_views(&views);
    }
    Ok(())
}

fn print_views(views: &[BillView]) {
    let rows: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.bill.id.clone(),
                v.bill.r#type.clone().unwrap_or_default(),
                v.bill.name.clone().unwrap_or_default(),
                v.formatted_date.clone(),
                v.bill.amount.map(|a| a.to_string()).unwrap_or_default(),
                v.status_label.clone(),
                v.bill.file_name.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Type", "Name", "Date", "Amount", "Status", "Receipt"],
            rows,
        )
    );
}

pub fn form_values(sub: &clap::ArgMatches) -> Result<FormValues> {
    Ok(FormValues {
        r#type: sub.get_one::<String>("type").unwrap().to_string(),
        name: sub.get_one::<String>("name").unwrap().to_string(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        vat: sub
            .get_one::<String>("vat")
            .map(|s| parse_decimal(s))
            .transpose()?,
        pct: sub.get_one::<u32>("pct").copied(),
        commentary: sub.get_one::<String>("commentary").map(|s| s.to_string()),
    })
}

fn new_bill(conn: &Connection, store: &dyn BillStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = require_session(conn)?;
    let path = sub.get_one::<String>("file").unwrap().trim();
    let values = form_values(sub)?;
    let file = UploadFile::from_path(Path::new(path))?;

    let landed = Cell::new(None);
    let nav = |route: Route| landed.set(Some(route));
    let mut submitter = NewBillSubmitter::new(store, &nav, session);

    match submitter.handle_file_change(file) {
        FileChange::Uploaded(p) => println!("Uploaded receipt '{}'", p.file_name),
        FileChange::Rejected { file_name } => {
            return Err(anyhow::anyhow!(
                "Unsupported receipt '{}', expected one of: {}",
                file_name,
                ALLOWED_EXTENSIONS.join(", ")
            ));
        }
        FileChange::Failed(e) => return Err(anyhow::Error::new(e).context("Receipt upload failed")),
    }

    match submitter.handle_submit(values) {
        SubmitOutcome::Submitted(bill) => {
            println!("Submitted bill {} ({})", bill.id, bill.status);
        }
        SubmitOutcome::Failed(e) => return Err(anyhow::Error::new(e).context("Bill submission failed")),
    }

    if landed.get() == Some(Route::Bills) {
        print_views(&query_views(store, SortOrder::Ascending)?);
    }
    Ok(())
}

fn status(store: &dyn BillStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let status: BillStatus = sub.get_one::<String>("status").unwrap().parse()?;
    let bill = update_status(store, id, status)
        .with_context(|| format!("Failed to update bill '{}'", id))?;
    println!("Bill {} is now {}", bill.id, bill.status);
    Ok(())
}
