// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use billed::store::{BillStore, HttpStore, LocalStore};
use billed::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("login", sub)) => commands::session::login(&conn, sub)?,
        Some(("whoami", _)) => commands::session::whoami(&conn)?,
        Some(("bills", sub)) => {
            let remote = match sub.get_one::<String>("api-url") {
                Some(url) => Some(HttpStore::new(
                    url,
                    sub.get_one::<String>("token").map(String::as_str),
                )?),
                None => None,
            };
            let local = LocalStore::new(&conn);
            let store: &dyn BillStore = match &remote {
                Some(r) => r,
                None => &local,
            };
            commands::bills::handle(&conn, store, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
