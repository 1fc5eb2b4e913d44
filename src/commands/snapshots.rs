// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::reports::snapshot::create_snapshot;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let date = match sub.get_one::<String>("date") {
                Some(s) => parse_date(s)?,
                None => ctx.today(),
            };
            let snap = create_snapshot(conn, ctx, date)?;
            println!(
                "Snapshot for {}: assets {}  liabilities {}  net worth {}",
                snap.date,
                fmt_money(&snap.total_assets),
                fmt_money(&snap.total_liabilities),
                fmt_money(&snap.net_worth),
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let snaps = store::list_snapshots(conn, ctx)?;
            if !maybe_print_json(json_flag, jsonl_flag, &snaps)? {
                let rows = snaps
                    .iter()
                    .map(|s| {
                        vec![
                            s.date.to_string(),
                            fmt_money(&s.total_assets),
                            fmt_money(&s.total_liabilities),
                            fmt_money(&s.equity),
                            fmt_money(&s.cash_balance),
                            fmt_money(&s.net_worth),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Date", "Assets", "Liabilities", "Equity", "Cash", "Net worth"],
                        rows,
                    )
                );
            }
        }
        _ => {}
    }
    Ok(())
}
