// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::RequestContext;
use crate::reports::categories::{breakdown_transactions, percentage_of, CategoryBreakdown};
use crate::store;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementSection {
    pub categories: Vec<CategoryBreakdown>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct IncomeStatement {
    pub period: Period,
    pub revenue: StatementSection,
    pub expenses: StatementSection,
    pub net_income: Decimal,
    pub net_income_margin: Decimal,
}

/// Income statement over the inclusive local-day range `[start, end]`:
/// transactions partitioned by type, each partition aggregated against
/// its own total, margin zero when there is no revenue.
pub fn income_statement(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<IncomeStatement> {
    let txs = store::transactions_between(conn, ctx, start, end)?;
    let categories = store::category_map(conn, ctx)?;

    let (revenue_txs, expense_txs): (Vec<_>, Vec<_>) =
        txs.into_iter().partition(|t| t.kind == crate::models::TxKind::Income);

    let revenue_total: Decimal = revenue_txs.iter().map(|t| t.amount).sum();
    let expense_total: Decimal = expense_txs.iter().map(|t| t.amount).sum();

    let revenue = StatementSection {
        categories: breakdown_transactions(&revenue_txs, &categories, revenue_total),
        total: revenue_total,
    };
    let expenses = StatementSection {
        categories: breakdown_transactions(&expense_txs, &categories, expense_total),
        total: expense_total,
    };

    let net_income = revenue_total - expense_total;
    let net_income_margin = percentage_of(net_income, revenue_total);

    Ok(IncomeStatement {
        period: Period { start, end },
        revenue,
        expenses,
        net_income,
        net_income_margin,
    })
}
