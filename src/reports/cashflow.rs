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
use crate::models::{FlowType, TxKind};
use crate::reports::categories::{breakdown_transactions, CategoryBreakdown};
use crate::reports::income::Period;
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct OperatingFlows {
    pub inflows: Decimal,
    pub outflows: Decimal,
    pub net: Decimal,
    pub inflow_categories: Vec<CategoryBreakdown>,
    pub outflow_categories: Vec<CategoryBreakdown>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestingDirection {
    Purchase,
    Sale,
}

impl InvestingDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestingDirection::Purchase => "purchase",
            InvestingDirection::Sale => "sale",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestingDetail {
    pub asset_id: i64,
    pub name: String,
    pub direction: InvestingDirection,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestingFlows {
    pub purchases: Decimal,
    pub sales: Decimal,
    pub net: Decimal,
    pub details: Vec<InvestingDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingDirection {
    Borrowing,
    Repayment,
}

impl FinancingDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancingDirection::Borrowing => "borrowing",
            FinancingDirection::Repayment => "repayment",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancingDetail {
    pub debt_id: i64,
    pub creditor: String,
    pub direction: FinancingDirection,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancingFlows {
    pub borrowing: Decimal,
    pub repayment: Decimal,
    pub net: Decimal,
    pub details: Vec<FinancingDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CashFlowStatement {
    pub period: Period,
    pub operations: OperatingFlows,
    pub investing: InvestingFlows,
    pub financing: FinancingFlows,
    pub net_cash_flow: Decimal,
    pub starting_cash: Decimal,
    pub ending_cash: Decimal,
}

/// Cash flow statement over the inclusive local-day range. Three
/// independent sub-flows; `ending_cash` always reconciles to
/// `starting_cash + net_cash_flow`.
pub fn cash_flow_statement(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<CashFlowStatement> {
    let operations = operating_flows(conn, ctx, start, end)?;
    let investing = investing_flows(conn, ctx, start, end)?;
    let financing = financing_flows(conn, ctx, start, end)?;

    let net_cash_flow = operations.net + investing.net + financing.net;
    let starting_cash = store::cash_balance_through(conn, ctx, start)?;
    let ending_cash = starting_cash + net_cash_flow;

    Ok(CashFlowStatement {
        period: Period { start, end },
        operations,
        investing,
        financing,
        net_cash_flow,
        starting_cash,
        ending_cash,
    })
}

/// Transactions with no flow tag default to operating.
fn operating_flows(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<OperatingFlows> {
    let txs: Vec<_> = store::transactions_between(conn, ctx, start, end)?
        .into_iter()
        .filter(|t| matches!(t.flow_type, None | Some(FlowType::Operating)))
        .collect();
    let categories = store::category_map(conn, ctx)?;

    let (inflow_txs, outflow_txs): (Vec<_>, Vec<_>) =
        txs.into_iter().partition(|t| t.kind == TxKind::Income);
    let inflows: Decimal = inflow_txs.iter().map(|t| t.amount).sum();
    let outflows: Decimal = outflow_txs.iter().map(|t| t.amount).sum();

    Ok(OperatingFlows {
        inflows,
        outflows,
        net: inflows - outflows,
        inflow_categories: breakdown_transactions(&inflow_txs, &categories, inflows),
        outflow_categories: breakdown_transactions(&outflow_txs, &categories, outflows),
    })
}

/// Purchases are assets created in the window; sales are inferred from
/// soft-deletes in the window, at the asset's last stored value (no
/// explicit sale price exists).
fn investing_flows(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<InvestingFlows> {
    let mut details = Vec::new();
    let mut purchases = Decimal::ZERO;
    let mut sales = Decimal::ZERO;

    for asset in store::assets_created_between(conn, ctx, start, end)? {
        purchases += asset.value;
        details.push(InvestingDetail {
            asset_id: asset.id,
            name: asset.name,
            direction: InvestingDirection::Purchase,
            amount: asset.value,
        });
    }
    for asset in store::assets_deactivated_between(conn, ctx, start, end)? {
        sales += asset.value;
        details.push(InvestingDetail {
            asset_id: asset.id,
            name: asset.name,
            direction: InvestingDirection::Sale,
            amount: asset.value,
        });
    }

    Ok(InvestingFlows { purchases, sales, net: sales - purchases, details })
}

/// Borrowing counts debts originated in the window at their full
/// amount; repayment counts debts retired in the window at the full
/// original obligation, not the remaining balance.
fn financing_flows(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<FinancingFlows> {
    let mut details = Vec::new();
    let mut borrowing = Decimal::ZERO;
    let mut repayment = Decimal::ZERO;

    for debt in store::debts_started_between(conn, ctx, start, end)? {
        borrowing += debt.total_amount;
        details.push(FinancingDetail {
            debt_id: debt.id,
            creditor: debt.creditor,
            direction: FinancingDirection::Borrowing,
            amount: debt.total_amount,
        });
    }
    for debt in store::debts_paid_between(conn, ctx, start, end)? {
        repayment += debt.total_amount;
        details.push(FinancingDetail {
            debt_id: debt.id,
            creditor: debt.creditor,
            direction: FinancingDirection::Repayment,
            amount: debt.total_amount,
        });
    }

    Ok(FinancingFlows { borrowing, repayment, net: borrowing - repayment, details })
}
