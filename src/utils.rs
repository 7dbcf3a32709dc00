// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BillStatus, Session};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const UA: &str = concat!("billed/", env!("CARGO_PKG_VERSION"));

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));

const FR_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

pub fn http_client(token: Option<&str>) -> Result<reqwest::blocking::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    if let Some(t) = token {
        let v = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", t))
            .context("Invalid API token")?;
        headers.insert(reqwest::header::AUTHORIZATION, v);
    }
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .default_headers(headers)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    if !ISO_DATE.is_match(s) {
        return Err(anyhow::anyhow!("Invalid date '{}', expected YYYY-MM-DD", s));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `2004-04-04` -> `4 Avr. 04`
pub fn format_date(s: &str) -> Result<String> {
    let d = parse_date(s)?;
    let month: String = FR_MONTHS[d.month0() as usize].chars().take(3).collect();
    let mut chars = month.chars();
    let month = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => month,
    };
    Ok(format!("{} {}. {:02}", d.day(), month, d.year().rem_euclid(100)))
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_session(conn: &Connection) -> Result<Option<Session>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='session'", [], |r| {
            r.get(0)
        })
        .optional()?;
    match v {
        Some(s) => Ok(Some(
            serde_json::from_str(&s).context("Stored session is corrupted, run `billed login`")?,
        )),
        None => Ok(None),
    }
}

pub fn set_session(conn: &Connection, session: &Session) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('session', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![serde_json::to_string(session)?],
    )?;
    Ok(())
}

pub fn require_session(conn: &Connection) -> Result<Session> {
    get_session(conn)?.context("Not logged in, run `billed login --email <EMAIL>` first")
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
