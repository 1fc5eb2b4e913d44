// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::models::Frequency;
use crate::store::{self, NewRecurring};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::str::FromStr;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income-add", sub)) => add(conn, ctx, sub, true)?,
        Some(("expense-add", sub)) => add(conn, ctx, sub, false)?,
        Some(("list", sub)) => list(conn, ctx, sub)?,
        Some(("end", sub)) => end(conn, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_new(ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<NewRecurring> {
    let start_date = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => ctx.today(),
    };
    let end_date = sub.get_one::<String>("end").map(|s| parse_date(s)).transpose()?;
    Ok(NewRecurring {
        name: sub.get_one::<String>("name").unwrap().clone(),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        frequency: Frequency::from_str(sub.get_one::<String>("frequency").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().clone(),
        start_date,
        end_date,
    })
}

fn add(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches, income: bool) -> Result<()> {
    let rec = parse_new(ctx, sub)?;
    let monthly = rec.frequency.monthly_equivalent(rec.amount);
    if income {
        store::insert_income_source(conn, ctx, &rec)?;
    } else {
        store::insert_recurring_expense(conn, ctx, &rec)?;
    }
    println!(
        "Added {} '{}': {} {} (~{}/month)",
        if income { "income source" } else { "recurring expense" },
        rec.name,
        fmt_money(&rec.amount),
        rec.frequency.as_str(),
        fmt_money(&monthly),
    );
    Ok(())
}

#[derive(Serialize)]
struct RecurringListRow {
    side: String,
    id: i64,
    name: String,
    amount: String,
    frequency: String,
    monthly_equivalent: String,
    category: String,
    start: String,
    end: String,
}

fn list(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let mut data = Vec::new();
    for s in store::active_income_sources(conn, ctx)? {
        data.push(RecurringListRow {
            side: "income".into(),
            id: s.id,
            name: s.name,
            amount: fmt_money(&s.amount),
            frequency: s.frequency.as_str().to_string(),
            monthly_equivalent: fmt_money(&s.frequency.monthly_equivalent(s.amount)),
            category: s.category,
            start: s.start_date.to_string(),
            end: s.end_date.map(|d| d.to_string()).unwrap_or_default(),
        });
    }
    for e in store::active_recurring_expenses(conn, ctx)? {
        data.push(RecurringListRow {
            side: "expense".into(),
            id: e.id,
            name: e.name,
            amount: fmt_money(&e.amount),
            frequency: e.frequency.as_str().to_string(),
            monthly_equivalent: fmt_money(&e.frequency.monthly_equivalent(e.amount)),
            category: e.category,
            start: e.start_date.to_string(),
            end: e.end_date.map(|d| d.to_string()).unwrap_or_default(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.side.clone(),
                    r.id.to_string(),
                    r.name.clone(),
                    r.amount.clone(),
                    r.frequency.clone(),
                    r.monthly_equivalent.clone(),
                    r.category.clone(),
                    r.start.clone(),
                    r.end.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Side", "Id", "Name", "Amount", "Frequency", "Monthly", "Category", "Start", "End"],
                rows,
            )
        );
    }
    Ok(())
}

fn end(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let income = sub.get_one::<String>("kind").unwrap() == "income";
    let id = *sub.get_one::<i64>("id").unwrap();
    let end_date = sub.get_one::<String>("date").map(|s| parse_date(s)).transpose()?;
    store::end_recurring(conn, ctx, income, id, end_date)?;
    println!("Ended recurring record {}", id);
    Ok(())
}
