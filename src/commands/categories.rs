// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::models::CategoryKind;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use std::str::FromStr;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let emoji = sub.get_one::<String>("emoji").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let kind = CategoryKind::from_str(sub.get_one::<String>("type").unwrap())?;
            store::insert_category(conn, ctx, name, emoji, color, kind)?;
            println!("Added category '{}' ({})", name, kind.as_str());
        }
        Some(("list", _)) => {
            let cats = store::list_categories(conn, ctx)?;
            let rows = cats
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.emoji.clone(),
                        c.name.clone(),
                        c.kind.as_str().to_string(),
                        c.color.clone(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Id", "", "Name", "Type", "Color"], rows));
        }
        _ => {}
    }
    Ok(())
}
