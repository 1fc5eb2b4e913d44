// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::context::RequestContext;
use crate::dates::month_start;
use crate::models::TxKind;
use crate::reports::categories::{percentage_of, UNCATEGORIZED_NAME};
use crate::store;

/// Free-text transaction category names mapped onto the planned
/// category keys used by IncomeSource/RecurringExpense records.
/// Matching is case-insensitive and exact; names with no entry and no
/// planned-key match get their own ad-hoc bucket rather than being
/// dropped.
const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("food", "food"),
    ("groceries", "food"),
    ("dining", "food"),
    ("restaurants", "food"),
    ("rent", "housing"),
    ("housing", "housing"),
    ("mortgage", "housing"),
    ("transport", "transportation"),
    ("transportation", "transportation"),
    ("fuel", "transportation"),
    ("utilities", "utilities"),
    ("electricity", "utilities"),
    ("water", "utilities"),
    ("internet", "utilities"),
    ("phone", "utilities"),
    ("entertainment", "entertainment"),
    ("subscriptions", "entertainment"),
    ("health", "healthcare"),
    ("healthcare", "healthcare"),
    ("pharmacy", "healthcare"),
    ("insurance", "insurance"),
    ("education", "education"),
    ("salary", "salary"),
    ("wages", "salary"),
    ("freelance", "freelance"),
    ("investments", "investments"),
    ("other", "other"),
];

#[derive(Debug, Clone, Serialize)]
pub struct BudgetCategory {
    pub key: String,
    pub planned: Decimal,
    pub actual: Decimal,
    /// Share of the planned total for this side of the budget.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetSummary {
    pub total_monthly_income: Decimal,
    pub total_monthly_expenses: Decimal,
    pub actual_monthly_expenses: Decimal,
    pub available_balance: Decimal,
    pub savings_rate: Decimal,
    pub expenses_by_category: Vec<BudgetCategory>,
    pub income_by_category: Vec<BudgetCategory>,
}

/// Aliased key when the table knows the name; otherwise the lowered
/// name itself, which either joins an exact-name planned bucket or
/// starts an ad-hoc one.
fn alias_key(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    for (alias, key) in CATEGORY_ALIASES {
        if *alias == lowered {
            return key.to_string();
        }
    }
    lowered
}

fn merged_categories(
    planned: HashMap<String, (Decimal, Decimal)>,
    planned_total: Decimal,
) -> Vec<BudgetCategory> {
    let mut out: Vec<BudgetCategory> = planned
        .into_iter()
        .map(|(key, (plan, actual))| BudgetCategory {
            key,
            planned: plan,
            actual,
            percentage: percentage_of(plan, planned_total),
        })
        .collect();
    out.sort_by(|a, b| {
        b.planned
            .cmp(&a.planned)
            .then_with(|| b.actual.cmp(&a.actual))
            .then_with(|| a.key.cmp(&b.key))
    });
    out
}

/// Monthly budget position: planned figures from active recurring
/// records normalized to monthly equivalents, actuals from the current
/// calendar month's realized transactions, merged per category.
pub fn budget_summary(conn: &Connection, ctx: &RequestContext) -> Result<BudgetSummary> {
    // Planned side, keyed by the recurring records' own category keys.
    let mut income_map: HashMap<String, (Decimal, Decimal)> = HashMap::new();
    let mut expense_map: HashMap<String, (Decimal, Decimal)> = HashMap::new();

    let mut total_monthly_income = Decimal::ZERO;
    for source in store::active_income_sources(conn, ctx)? {
        let monthly = source.frequency.monthly_equivalent(source.amount);
        total_monthly_income += monthly;
        income_map
            .entry(source.category.trim().to_lowercase())
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .0 += monthly;
    }

    let mut total_monthly_expenses = Decimal::ZERO;
    for expense in store::active_recurring_expenses(conn, ctx)? {
        let monthly = expense.frequency.monthly_equivalent(expense.amount);
        total_monthly_expenses += monthly;
        expense_map
            .entry(expense.category.trim().to_lowercase())
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .0 += monthly;
    }

    // Actual side from this month's realized transactions, keyed by the
    // transaction category's display name run through the alias table.
    let today = ctx.today();
    let txs = store::transactions_between(conn, ctx, month_start(today), today)?;
    let categories = store::category_map(conn, ctx)?;

    let mut actual_monthly_expenses = Decimal::ZERO;
    for tx in &txs {
        let name = tx
            .category_id
            .and_then(|id| categories.get(&id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED_NAME);
        match tx.kind {
            TxKind::Expense => {
                actual_monthly_expenses += tx.amount;
                expense_map
                    .entry(alias_key(name))
                    .or_insert((Decimal::ZERO, Decimal::ZERO))
                    .1 += tx.amount;
            }
            TxKind::Income => {
                income_map
                    .entry(alias_key(name))
                    .or_insert((Decimal::ZERO, Decimal::ZERO))
                    .1 += tx.amount;
            }
        }
    }

    let available_balance = total_monthly_income - total_monthly_expenses;
    let savings_rate = percentage_of(available_balance, total_monthly_income);

    Ok(BudgetSummary {
        total_monthly_income,
        total_monthly_expenses,
        actual_monthly_expenses,
        available_balance,
        savings_rate,
        expenses_by_category: merged_categories(expense_map, total_monthly_expenses),
        income_by_category: merged_categories(income_map, total_monthly_income),
    })
}
