// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("billed")
        .version(crate_version!())
        .about("Employee expense bills: list, submit with receipt, track approval")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .env("BILLED_API_URL")
                .global(true)
                .help("Remote bills API; the local database is used when unset"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .env("BILLED_TOKEN")
                .hide_env_values(true)
                .global(true)
                .help("Bearer token for the remote API"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("login")
                .about("Remember who submits bills")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .default_value("Employee")
                        .value_parser(["Employee", "Admin"]),
                ),
        )
        .subcommand(Command::new("whoami").about("Show the stored session"))
        .subcommand(
            Command::new("bills")
                .about("Expense bills")
                .subcommand_required(true)
                .subcommand(json_args(
                    Command::new("list").arg(
                        Arg::new("order")
                            .long("order")
                            .default_value("asc")
                            .value_parser(["asc", "desc"]),
                    ),
                ))
                .subcommand(
                    Command::new("new")
                        .about("Upload a receipt then submit the bill")
                        .arg(
                            Arg::new("file")
                                .long("file")
                                .required(true)
                                .help("Receipt image (jpg, jpeg or png)"),
                        )
                        .arg(Arg::new("type").long("type").default_value("Transports"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("vat").long("vat"))
                        .arg(
                            Arg::new("pct")
                                .long("pct")
                                .value_parser(clap::value_parser!(u32)),
                        )
                        .arg(Arg::new("commentary").long("commentary")),
                )
                .subcommand(
                    Command::new("status")
                        .about("Change the approval status of a bill")
                        .arg(Arg::new("id").long("id").required(true))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .required(true)
                                .value_parser(["pending", "accepted", "refused"]),
                        ),
                ),
        )
}
