// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::context::RequestContext;
use crate::models::FinancialSnapshot;
use crate::reports::balance::compute_balance_sheet;
use crate::store;

/// Materialize the balance sheet for a date as a FinancialSnapshot, one
/// row per (user, date), overwriting any prior snapshot for that date.
/// Always computes the slow path; snapshots never feed themselves.
/// There is no invalidation: a snapshot serves reads for its date even
/// after the underlying records change.
pub fn create_snapshot(
    conn: &Connection,
    ctx: &RequestContext,
    date: NaiveDate,
) -> Result<FinancialSnapshot> {
    let sheet = compute_balance_sheet(conn, ctx, date)?;
    let cash_balance = store::cash_balance_through(conn, ctx, date)?;

    let snap = FinancialSnapshot {
        id: 0,
        user_id: ctx.user_id,
        date,
        total_assets: sheet.assets.total,
        liquid_assets: sheet.assets.liquid_total,
        illiquid_assets: sheet.assets.illiquid_total,
        total_liabilities: sheet.liabilities.total,
        short_term_liabilities: sheet.liabilities.current_total,
        long_term_liabilities: sheet.liabilities.long_term_total,
        equity: sheet.equity,
        cash_balance,
        net_worth: sheet.net_worth,
    };
    store::upsert_snapshot(conn, ctx, &snap)?;
    store::snapshot_for_date(conn, ctx, date)?
        .context("Snapshot missing immediately after upsert")
}
