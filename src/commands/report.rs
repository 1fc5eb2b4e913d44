// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::reports::balance::balance_sheet;
use crate::reports::budget::budget_summary;
use crate::reports::cashflow::cash_flow_statement;
use crate::reports::categories::CategoryBreakdown;
use crate::reports::income::income_statement;
use crate::reports::kpi::financial_kpis;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => income(conn, ctx, sub)?,
        Some(("balance", sub)) => balance(conn, ctx, sub)?,
        Some(("cashflow", sub)) => cashflow(conn, ctx, sub)?,
        Some(("budget", sub)) => budget(conn, ctx, sub)?,
        Some(("kpis", sub)) => kpis(conn, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn breakdown_rows(categories: &[CategoryBreakdown]) -> Vec<Vec<String>> {
    categories
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.emoji, c.name).trim().to_string(),
                fmt_money(&c.amount),
                fmt_pct(&c.percentage),
                c.transaction_count.to_string(),
            ]
        })
        .collect()
}

fn income(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let statement = income_statement(conn, ctx, start, end)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &statement)? {
        return Ok(());
    }

    println!("Income statement {} .. {}", start, end);
    println!(
        "{}",
        pretty_table(
            &["Revenue", "Amount", "Share", "Txs"],
            breakdown_rows(&statement.revenue.categories),
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Expenses", "Amount", "Share", "Txs"],
            breakdown_rows(&statement.expenses.categories),
        )
    );
    println!(
        "Revenue {}  Expenses {}  Net income {}  Margin {}",
        fmt_money(&statement.revenue.total),
        fmt_money(&statement.expenses.total),
        fmt_money(&statement.net_income),
        fmt_pct(&statement.net_income_margin),
    );
    Ok(())
}

fn balance(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let as_of = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => ctx.today(),
    };
    let report = balance_sheet(conn, ctx, as_of)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }

    let cached = report.is_cached();
    let sheet = report.sheet();
    println!(
        "Balance sheet as of {}{}",
        sheet.date,
        if cached { " (from snapshot, aggregate detail only)" } else { "" }
    );

    if !cached {
        let mut rows = Vec::new();
        for line in &sheet.assets.liquid {
            rows.push(vec![
                "liquid".to_string(),
                line.name.clone(),
                fmt_money(&line.value),
                fmt_pct(&line.percentage),
            ]);
        }
        for line in &sheet.assets.illiquid {
            rows.push(vec![
                "illiquid".to_string(),
                line.name.clone(),
                fmt_money(&line.value),
                fmt_pct(&line.percentage),
            ]);
        }
        println!("{}", pretty_table(&["Assets", "Name", "Value", "Share"], rows));

        let mut rows = Vec::new();
        for line in &sheet.liabilities.current {
            rows.push(vec![
                "current".to_string(),
                line.creditor.clone(),
                fmt_money(&line.remaining),
                fmt_pct(&line.percentage),
            ]);
        }
        for line in &sheet.liabilities.long_term {
            rows.push(vec![
                "long-term".to_string(),
                line.creditor.clone(),
                fmt_money(&line.remaining),
                fmt_pct(&line.percentage),
            ]);
        }
        println!(
            "{}",
            pretty_table(&["Liabilities", "Creditor", "Remaining", "Share"], rows)
        );
    }

    println!(
        "Assets {} (liquid {} / illiquid {})  Liabilities {} (current {} / long-term {})",
        fmt_money(&sheet.assets.total),
        fmt_money(&sheet.assets.liquid_total),
        fmt_money(&sheet.assets.illiquid_total),
        fmt_money(&sheet.liabilities.total),
        fmt_money(&sheet.liabilities.current_total),
        fmt_money(&sheet.liabilities.long_term_total),
    );
    println!(
        "Net worth {}  Debt/assets {:.2}  Current ratio {:.2}  Liquidity {:.1} months",
        fmt_money(&sheet.net_worth),
        sheet.ratios.debt_to_assets,
        sheet.ratios.current_ratio,
        sheet.ratios.liquidity_months,
    );
    Ok(())
}

fn cashflow(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let start = parse_date(sub.get_one::<String>("from").unwrap())?;
    let end = parse_date(sub.get_one::<String>("to").unwrap())?;
    let statement = cash_flow_statement(conn, ctx, start, end)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &statement)? {
        return Ok(());
    }

    println!("Cash flow statement {} .. {}", start, end);
    println!(
        "{}",
        pretty_table(
            &["Operating inflows", "Amount", "Share", "Txs"],
            breakdown_rows(&statement.operations.inflow_categories),
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Operating outflows", "Amount", "Share", "Txs"],
            breakdown_rows(&statement.operations.outflow_categories),
        )
    );

    let investing_rows = statement
        .investing
        .details
        .iter()
        .map(|d| {
            vec![
                d.direction.as_str().to_string(),
                d.name.clone(),
                fmt_money(&d.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Investing", "Asset", "Amount"], investing_rows));

    let financing_rows = statement
        .financing
        .details
        .iter()
        .map(|d| {
            vec![
                d.direction.as_str().to_string(),
                d.creditor.clone(),
                fmt_money(&d.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Financing", "Creditor", "Amount"], financing_rows));

    println!(
        "Operating {}  Investing {}  Financing {}  Net {}",
        fmt_money(&statement.operations.net),
        fmt_money(&statement.investing.net),
        fmt_money(&statement.financing.net),
        fmt_money(&statement.net_cash_flow),
    );
    println!(
        "Starting cash {}  Ending cash {}",
        fmt_money(&statement.starting_cash),
        fmt_money(&statement.ending_cash),
    );
    Ok(())
}

fn budget(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let summary = budget_summary(conn, ctx)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    let rows = |cats: &[crate::reports::budget::BudgetCategory]| {
        cats.iter()
            .map(|c| {
                vec![
                    c.key.clone(),
                    fmt_money(&c.planned),
                    fmt_money(&c.actual),
                    fmt_pct(&c.percentage),
                ]
            })
            .collect::<Vec<_>>()
    };
    println!(
        "{}",
        pretty_table(
            &["Income category", "Planned", "Actual", "Share"],
            rows(&summary.income_by_category),
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Expense category", "Planned", "Actual", "Share"],
            rows(&summary.expenses_by_category),
        )
    );
    println!(
        "Monthly income {}  Planned expenses {}  Actual expenses {}",
        fmt_money(&summary.total_monthly_income),
        fmt_money(&summary.total_monthly_expenses),
        fmt_money(&summary.actual_monthly_expenses),
    );
    println!(
        "Available {}  Savings rate {}",
        fmt_money(&summary.available_balance),
        fmt_pct(&summary.savings_rate),
    );
    Ok(())
}

fn kpis(conn: &Connection, ctx: &RequestContext, sub: &clap::ArgMatches) -> Result<()> {
    let kpis = financial_kpis(conn, ctx)?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &kpis)? {
        return Ok(());
    }

    let mut rows = vec![
        vec!["Total assets".to_string(), fmt_money(&kpis.total_assets)],
        vec![
            "Liquid assets".to_string(),
            format!("{} ({})", fmt_money(&kpis.liquid_assets), fmt_pct(&kpis.liquid_percentage)),
        ],
        vec![
            "Illiquid assets".to_string(),
            format!("{} ({})", fmt_money(&kpis.illiquid_assets), fmt_pct(&kpis.illiquid_percentage)),
        ],
        vec!["Total debt".to_string(), fmt_money(&kpis.total_debt)],
        vec!["Monthly debt payments".to_string(), fmt_money(&kpis.monthly_debt_payments)],
        vec!["Monthly income".to_string(), fmt_money(&kpis.total_monthly_income)],
        vec!["Monthly expenses".to_string(), fmt_money(&kpis.total_monthly_expenses)],
        vec!["Available balance".to_string(), fmt_money(&kpis.available_balance)],
        vec!["Savings rate".to_string(), fmt_pct(&kpis.savings_rate)],
        vec!["Solvency ratio".to_string(), format!("{:.2}", kpis.solvency_ratio)],
    ];
    for group in &kpis.debt_by_type {
        rows.push(vec![
            format!("Debt: {}", group.key),
            format!("{} ({})", fmt_money(&group.amount), fmt_pct(&group.percentage)),
        ]);
    }
    println!("{}", pretty_table(&["KPI", "Value"], rows));
    Ok(())
}
