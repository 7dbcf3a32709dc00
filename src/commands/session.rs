// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Session;
use crate::utils::{get_session, set_session};
use anyhow::Result;
use rusqlite::Connection;

pub fn login(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let email = m.get_one::<String>("email").unwrap().trim().to_string();
    if email.is_empty() {
        return Err(anyhow::anyhow!("Email must not be empty"));
    }
    let session = Session {
        email,
        r#type: m.get_one::<String>("type").unwrap().to_string(),
    };
    set_session(conn, &session)?;
    println!("Logged in as {} ({})", session.email, session.r#type);
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    match get_session(conn)? {
        Some(s) => println!("{} ({})", s.email, s.r#type),
        None => println!("Not logged in"),
    }
    Ok(())
}
