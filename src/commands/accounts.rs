// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::store;
use crate::utils::{fmt_money, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
            store::insert_account(conn, ctx, name, balance)?;
            println!("Added account '{}' with balance {}", name, fmt_money(&balance));
        }
        Some(("list", _)) => {
            let accounts = store::list_accounts(conn, ctx)?;
            let rows = accounts
                .iter()
                .map(|a| {
                    vec![
                        a.id.to_string(),
                        a.name.clone(),
                        fmt_money(&a.current_balance),
                        if a.is_active { "active" } else { "closed" }.to_string(),
                        a.created_at.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Id", "Name", "Balance", "Status", "Created"], rows)
            );
        }
        Some(("close", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            store::close_account(conn, ctx, name)?;
            println!("Closed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
