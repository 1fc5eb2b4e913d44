// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::RequestContext;
use crate::models::AssetKind;
use crate::reports::budget::budget_summary;
use crate::reports::categories::{grouped_totals, percentage_of, ratio_of, GroupTotal};
use crate::store;

/// Dashboard figure set composed from the budget summary plus raw
/// asset/debt fetches. Read-only composition; no algorithm of its own.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialKpis {
    pub total_assets: Decimal,
    pub liquid_assets: Decimal,
    pub illiquid_assets: Decimal,
    pub liquid_percentage: Decimal,
    pub illiquid_percentage: Decimal,
    pub total_debt: Decimal,
    pub monthly_debt_payments: Decimal,
    pub debt_by_type: Vec<GroupTotal>,
    pub total_monthly_income: Decimal,
    pub total_monthly_expenses: Decimal,
    pub available_balance: Decimal,
    pub savings_rate: Decimal,
    pub solvency_ratio: Decimal,
}

pub fn financial_kpis(conn: &Connection, ctx: &RequestContext) -> Result<FinancialKpis> {
    let budget = budget_summary(conn, ctx)?;

    let assets = store::list_assets(conn, ctx, false)?;
    let liquid_assets: Decimal = assets
        .iter()
        .filter(|a| a.kind == AssetKind::Liquid)
        .map(|a| a.value)
        .sum();
    let illiquid_assets: Decimal = assets
        .iter()
        .filter(|a| a.kind == AssetKind::Illiquid)
        .map(|a| a.value)
        .sum();
    let total_assets = liquid_assets + illiquid_assets;

    let debts = store::active_debts(conn, ctx)?;
    let total_debt: Decimal = debts.iter().map(|d| d.remaining_amount).sum();
    let monthly_debt_payments: Decimal = debts.iter().map(|d| d.monthly_payment).sum();
    let debt_by_type = grouped_totals(
        &debts,
        |d| d.kind.clone(),
        |d| d.remaining_amount,
        total_debt,
    );

    let solvency_ratio = ratio_of(
        liquid_assets,
        budget.total_monthly_expenses + monthly_debt_payments,
    );

    Ok(FinancialKpis {
        total_assets,
        liquid_assets,
        illiquid_assets,
        liquid_percentage: percentage_of(liquid_assets, total_assets),
        illiquid_percentage: percentage_of(illiquid_assets, total_assets),
        total_debt,
        monthly_debt_payments,
        debt_by_type,
        total_monthly_income: budget.total_monthly_income,
        total_monthly_expenses: budget.total_monthly_expenses,
        available_balance: budget.available_balance,
        savings_rate: budget.savings_rate,
        solvency_ratio,
    })
}
