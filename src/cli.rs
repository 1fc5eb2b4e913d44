// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn date_arg(name: &'static str, help: &'static str, required: bool) -> Arg {
    Arg::new(name).long(name).value_name("YYYY-MM-DD").help(help).required(required)
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .about("Personal finance statements with timezone-correct dates")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("profile")
                .about("Request context settings (user, timezone)")
                .subcommand(Command::new("show").about("Show the active profile"))
                .subcommand(
                    Command::new("timezone").about("Set the IANA timezone").arg(
                        Arg::new("name")
                            .value_name("TZ")
                            .required(true)
                            .help("IANA name, e.g. America/New_York"),
                    ),
                )
                .subcommand(
                    Command::new("user").about("Set the active user id").arg(
                        Arg::new("id")
                            .value_name("ID")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Balance-bearing accounts (the cash basis)")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .value_name("AMOUNT")
                                .default_value("0"),
                        ),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("close").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("emoji").long("emoji").default_value(""))
                        .arg(Arg::new("color").long("color").default_value(""))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense", "both"])
                                .default_value("expense"),
                        ),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("tx")
                .about("Realized transactions")
                .subcommand(
                    Command::new("add")
                        .arg(date_arg("date", "Transaction day (local)", true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").value_name("NAME"))
                        .arg(
                            Arg::new("flow")
                                .long("flow")
                                .value_parser(["operating", "investing", "financing"])
                                .help("Cash-flow classification; defaults to operating"),
                        )
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .arg(date_arg("from", "Start day (local, inclusive)", false))
                        .arg(date_arg("to", "End day (local, inclusive)", false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .default_value("50"),
                        ),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Planned recurring income and expenses")
                .subcommand(recurring_add("income-add"))
                .subcommand(recurring_add("expense-add"))
                .subcommand(with_json_flags(Command::new("list")))
                .subcommand(
                    Command::new("end")
                        .about("Deactivate a recurring record")
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .required(true),
                        )
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        )
                        .arg(date_arg("date", "End day (local)", false)),
                ),
        )
        .subcommand(
            Command::new("asset")
                .about("Assets (soft-deleted on sale)")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["liquid", "illiquid"])
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").default_value(""))
                        .arg(date_arg("purchased", "Purchase day (local)", false)),
                )
                .subcommand(with_json_flags(
                    Command::new("list").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include sold (inactive) assets"),
                    ),
                ))
                .subcommand(
                    Command::new("sell").arg(
                        Arg::new("id")
                            .long("id")
                            .value_parser(value_parser!(i64))
                            .required(true),
                    ),
                ),
        )
        .subcommand(
            Command::new("debt")
                .about("Debts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("creditor").long("creditor").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("payment").long("payment").default_value("0"))
                        .arg(Arg::new("rate").long("rate").default_value("0"))
                        .arg(Arg::new("type").long("type").default_value("personal"))
                        .arg(date_arg("start", "Origination day (local)", true))
                        .arg(date_arg("end", "Maturity day (local)", false)),
                )
                .subcommand(with_json_flags(Command::new("list")))
                .subcommand(
                    Command::new("payoff")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .required(true),
                        )
                        .arg(date_arg("date", "Payoff day (local); defaults to today", false)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Financial statements")
                .subcommand(with_json_flags(
                    Command::new("income")
                        .about("Income statement for a period")
                        .arg(date_arg("from", "Start day (local, inclusive)", true))
                        .arg(date_arg("to", "End day (local, inclusive)", true)),
                ))
                .subcommand(with_json_flags(
                    Command::new("balance")
                        .about("Balance sheet as of a day")
                        .arg(date_arg("date", "As-of day (local); defaults to today", false)),
                ))
                .subcommand(with_json_flags(
                    Command::new("cashflow")
                        .about("Cash flow statement for a period")
                        .arg(date_arg("from", "Start day (local, inclusive)", true))
                        .arg(date_arg("to", "End day (local, inclusive)", true)),
                ))
                .subcommand(with_json_flags(
                    Command::new("budget").about("Monthly budget summary"),
                ))
                .subcommand(with_json_flags(
                    Command::new("kpis").about("Dashboard KPI figures"),
                )),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Balance sheet materialization")
                .subcommand(
                    Command::new("create")
                        .arg(date_arg("date", "Day to snapshot (local); defaults to today", false)),
                )
                .subcommand(with_json_flags(Command::new("list"))),
        )
        .subcommand(Command::new("doctor").about("Integrity checks"))
}

fn recurring_add(name: &'static str) -> Command {
    Command::new(name)
        .arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(
            Arg::new("frequency")
                .long("frequency")
                .value_parser(["weekly", "biweekly", "monthly", "annual"])
                .required(true),
        )
        .arg(Arg::new("category").long("category").required(true))
        .arg(date_arg("start", "First day (local); defaults to today", false))
        .arg(date_arg("end", "Last day (local)", false))
}
