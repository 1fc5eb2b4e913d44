// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::models::AssetKind;
use crate::store::{self, NewAsset};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use std::str::FromStr;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let asset = NewAsset {
                name: sub.get_one::<String>("name").unwrap().clone(),
                value: parse_amount(sub.get_one::<String>("value").unwrap())?,
                kind: AssetKind::from_str(sub.get_one::<String>("type").unwrap())?,
                category: sub.get_one::<String>("category").unwrap().clone(),
                purchase_date: sub
                    .get_one::<String>("purchased")
                    .map(|s| parse_date(s))
                    .transpose()?,
            };
            store::insert_asset(conn, ctx, &asset)?;
            println!(
                "Added {} asset '{}' worth {}",
                asset.kind.as_str(),
                asset.name,
                fmt_money(&asset.value)
            );
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let assets = store::list_assets(conn, ctx, sub.get_flag("all"))?;
            if !maybe_print_json(json_flag, jsonl_flag, &assets)? {
                let rows = assets
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.kind.as_str().to_string(),
                            a.category.clone(),
                            fmt_money(&a.value),
                            if a.is_active { "active" } else { "sold" }.to_string(),
                            a.created_at.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "Name", "Type", "Category", "Value", "Status", "Created"],
                        rows,
                    )
                );
            }
        }
        Some(("sell", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store::sell_asset(conn, ctx, id)?;
            println!("Marked asset {} as sold", id);
        }
        _ => {}
    }
    Ok(())
}
