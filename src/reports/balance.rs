// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::RequestContext;
use crate::dates::months_back;
use crate::models::{Asset, AssetKind, Debt, TxKind};
use crate::reports::categories::{percentage_of, ratio_of};
use crate::store;

/// Debts whose end date falls within this horizon of the as-of date are
/// current (short-term); the boundary day itself is current.
const CURRENT_DEBT_HORIZON_DAYS: i64 = 365;

#[derive(Debug, Clone, Serialize)]
pub struct AssetLine {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub value: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtLine {
    pub id: i64,
    pub creditor: String,
    pub kind: String,
    pub remaining: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AssetsSection {
    pub liquid: Vec<AssetLine>,
    pub illiquid: Vec<AssetLine>,
    pub liquid_total: Decimal,
    pub illiquid_total: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct LiabilitiesSection {
    pub current: Vec<DebtLine>,
    pub long_term: Vec<DebtLine>,
    pub current_total: Decimal,
    pub long_term_total: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceRatios {
    pub debt_to_assets: Decimal,
    pub current_ratio: Decimal,
    pub liquidity_months: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub date: NaiveDate,
    pub assets: AssetsSection,
    pub liabilities: LiabilitiesSection,
    /// Always equal to `net_worth`; two names for the accounting and
    /// dashboard vocabularies.
    pub equity: Decimal,
    pub net_worth: Decimal,
    pub ratios: BalanceRatios,
}

/// Which path produced the sheet. The cached variant is reconstructed
/// from snapshot aggregates and carries no per-item detail.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum BalanceSheetReport {
    Cached(BalanceSheet),
    Computed(BalanceSheet),
}

impl BalanceSheetReport {
    pub fn sheet(&self) -> &BalanceSheet {
        match self {
            BalanceSheetReport::Cached(s) | BalanceSheetReport::Computed(s) => s,
        }
    }

    pub fn into_sheet(self) -> BalanceSheet {
        match self {
            BalanceSheetReport::Cached(s) | BalanceSheetReport::Computed(s) => s,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, BalanceSheetReport::Cached(_))
    }
}

/// Balance sheet as of a local calendar day. Served from a
/// FinancialSnapshot when one exists for exactly that date (aggregate
/// detail only, staleness accepted), otherwise computed from live
/// assets and debts.
pub fn balance_sheet(
    conn: &Connection,
    ctx: &RequestContext,
    as_of: NaiveDate,
) -> Result<BalanceSheetReport> {
    if let Some(snap) = store::snapshot_for_date(conn, ctx, as_of)? {
        let ratios = BalanceRatios {
            debt_to_assets: ratio_of(snap.total_liabilities, snap.total_assets),
            current_ratio: ratio_of(snap.liquid_assets, snap.short_term_liabilities),
            liquidity_months: ratio_of(snap.liquid_assets, average_monthly_expenses(conn, ctx)?),
        };
        let sheet = BalanceSheet {
            date: snap.date,
            assets: AssetsSection {
                liquid: Vec::new(),
                illiquid: Vec::new(),
                liquid_total: snap.liquid_assets,
                illiquid_total: snap.illiquid_assets,
                total: snap.total_assets,
            },
            liabilities: LiabilitiesSection {
                current: Vec::new(),
                long_term: Vec::new(),
                current_total: snap.short_term_liabilities,
                long_term_total: snap.long_term_liabilities,
                total: snap.total_liabilities,
            },
            equity: snap.equity,
            net_worth: snap.net_worth,
            ratios,
        };
        return Ok(BalanceSheetReport::Cached(sheet));
    }
    Ok(BalanceSheetReport::Computed(compute_balance_sheet(conn, ctx, as_of)?))
}

/// A debt is current when it has an end date on or before the horizon;
/// open-ended debts are always long-term.
pub fn is_current_debt(debt: &Debt, as_of: NaiveDate) -> bool {
    match debt.end_date {
        Some(end) => end <= as_of + Duration::days(CURRENT_DEBT_HORIZON_DAYS),
        None => false,
    }
}

fn asset_lines(assets: &[Asset]) -> (Vec<AssetLine>, Decimal) {
    let total: Decimal = assets.iter().map(|a| a.value).sum();
    let mut lines: Vec<AssetLine> = assets
        .iter()
        .map(|a| AssetLine {
            id: a.id,
            name: a.name.clone(),
            category: a.category.clone(),
            value: a.value,
            percentage: percentage_of(a.value, total),
        })
        .collect();
    lines.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    (lines, total)
}

fn debt_lines(debts: &[Debt]) -> (Vec<DebtLine>, Decimal) {
    let total: Decimal = debts.iter().map(|d| d.remaining_amount).sum();
    let mut lines: Vec<DebtLine> = debts
        .iter()
        .map(|d| DebtLine {
            id: d.id,
            creditor: d.creditor.clone(),
            kind: d.kind.clone(),
            remaining: d.remaining_amount,
            percentage: percentage_of(d.remaining_amount, total),
        })
        .collect();
    lines.sort_by(|a, b| b.remaining.cmp(&a.remaining).then_with(|| a.creditor.cmp(&b.creditor)));
    (lines, total)
}

/// Slow path: live partition of active assets and debts as of the date.
pub fn compute_balance_sheet(
    conn: &Connection,
    ctx: &RequestContext,
    as_of: NaiveDate,
) -> Result<BalanceSheet> {
    let assets = store::active_assets_through(conn, ctx, as_of)?;
    let debts = store::active_debts_through(conn, ctx, as_of)?;

    let (liquid_assets, illiquid_assets): (Vec<_>, Vec<_>) =
        assets.into_iter().partition(|a| a.kind == AssetKind::Liquid);
    let (liquid, liquid_total) = asset_lines(&liquid_assets);
    let (illiquid, illiquid_total) = asset_lines(&illiquid_assets);
    let assets_total = liquid_total + illiquid_total;

    let (current_debts, long_term_debts): (Vec<_>, Vec<_>) =
        debts.into_iter().partition(|d| is_current_debt(d, as_of));
    let (current, current_total) = debt_lines(&current_debts);
    let (long_term, long_term_total) = debt_lines(&long_term_debts);
    let liabilities_total = current_total + long_term_total;

    let equity = assets_total - liabilities_total;

    let ratios = BalanceRatios {
        debt_to_assets: ratio_of(liabilities_total, assets_total),
        current_ratio: ratio_of(liquid_total, current_total),
        liquidity_months: ratio_of(liquid_total, average_monthly_expenses(conn, ctx)?),
    };

    Ok(BalanceSheet {
        date: as_of,
        assets: AssetsSection {
            liquid,
            illiquid,
            liquid_total,
            illiquid_total,
            total: assets_total,
        },
        liabilities: LiabilitiesSection {
            current,
            long_term,
            current_total,
            long_term_total,
            total: liabilities_total,
        },
        equity,
        net_worth: equity,
        ratios,
    })
}

/// Mean monthly expense spend over the trailing three calendar months
/// counted from today (current month through today plus the two
/// before), regardless of the sheet's as-of date. Kept relative to the
/// present because the ratio feeds the present-day dashboard.
fn average_monthly_expenses(conn: &Connection, ctx: &RequestContext) -> Result<Decimal> {
    let today = ctx.today();
    let window_start = months_back(today, 2);
    let txs = store::transactions_between(conn, ctx, window_start, today)?;
    let spent: Decimal = txs
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .map(|t| t.amount)
        .sum();
    Ok(spent / Decimal::from(3))
}
