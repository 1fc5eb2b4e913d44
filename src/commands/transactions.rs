// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::models::{FlowType, TxKind};
use crate::store::{self, NewTransaction};
use crate::utils::{
    fmt_money, id_for_category, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::str::FromStr;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, ctx, sub)?,
        Some(("list", sub)) => list(conn, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let kind = TxKind::from_str(sub.get_one::<String>("type").unwrap())?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|name| id_for_category(conn, ctx.user_id, name))
        .transpose()?;
    let flow_type = sub
        .get_one::<String>("flow")
        .map(|f| FlowType::from_str(f))
        .transpose()?;
    let note = sub.get_one::<String>("note").cloned();

    store::insert_transaction(
        conn,
        ctx,
        &NewTransaction {
            date,
            amount,
            kind,
            category_id,
            is_recurring: sub.get_flag("recurring"),
            flow_type,
            note,
        },
    )?;
    println!("Recorded {} {} on {}", kind.as_str(), fmt_money(&amount), date);
    Ok(())
}

#[derive(Serialize)]
struct TransactionRow {
    id: i64,
    date: String,
    kind: String,
    amount: String,
    category: String,
    flow: String,
    recurring: bool,
    note: String,
}

fn list(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let txs = match (
        sub.get_one::<String>("from"),
        sub.get_one::<String>("to"),
    ) {
        (Some(from), Some(to)) => {
            store::transactions_between(conn, ctx, parse_date(from)?, parse_date(to)?)?
        }
        (None, None) => {
            let limit = *sub.get_one::<usize>("limit").unwrap();
            store::recent_transactions(conn, ctx, limit)?
        }
        _ => anyhow::bail!("--from and --to must be given together"),
    };

    let categories = store::category_map(conn, ctx)?;
    let data: Vec<TransactionRow> = txs
        .iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            amount: fmt_money(&t.amount),
            category: t
                .category_id
                .and_then(|id| categories.get(&id))
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            flow: t.flow_type.map(|f| f.as_str()).unwrap_or("").to_string(),
            recurring: t.is_recurring,
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.flow.clone(),
                    if r.recurring { "yes" } else { "" }.to_string(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Category", "Flow", "Recurring", "Note"],
                rows,
            )
        );
    }
    Ok(())
}
