// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::store::{self, NewDebt};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let debt = NewDebt {
                creditor: sub.get_one::<String>("creditor").unwrap().clone(),
                total_amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
                monthly_payment: parse_decimal(sub.get_one::<String>("payment").unwrap())?,
                annual_rate: parse_decimal(sub.get_one::<String>("rate").unwrap())?,
                kind: sub.get_one::<String>("type").unwrap().clone(),
                start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
                end_date: sub.get_one::<String>("end").map(|s| parse_date(s)).transpose()?,
            };
            store::insert_debt(conn, ctx, &debt)?;
            println!(
                "Added debt to '{}' for {} starting {}",
                debt.creditor,
                fmt_money(&debt.total_amount),
                debt.start_date
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let debts = store::list_debts(conn, ctx)?;
            if !maybe_print_json(json_flag, jsonl_flag, &debts)? {
                let rows = debts
                    .iter()
                    .map(|d| {
                        vec![
                            d.id.to_string(),
                            d.creditor.clone(),
                            d.kind.clone(),
                            fmt_money(&d.total_amount),
                            fmt_money(&d.remaining_amount),
                            fmt_money(&d.monthly_payment),
                            d.status.as_str().to_string(),
                            d.start_date.to_string(),
                            d.end_date.map(|x| x.to_string()).unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Creditor", "Type", "Total", "Remaining", "Payment", "Status", "Start", "End"],
                        rows,
                    )
                );
            }
        }
        Some(("payoff", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let paid_date = match sub.get_one::<String>("date") {
                Some(s) => parse_date(s)?,
                None => ctx.today(),
            };
            store::payoff_debt(conn, ctx, id, paid_date)?;
            println!("Debt {} paid off on {}", id, paid_date);
        }
        _ => {}
    }
    Ok(())
}
