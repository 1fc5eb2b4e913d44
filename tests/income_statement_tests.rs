// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::context::RequestContext;
use centavo::db;
use centavo::models::{CategoryKind, TxKind};
use centavo::reports::income::income_statement;
use centavo::store::{self, NewTransaction};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, RequestContext) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let ctx = RequestContext::new(1, "America/El_Salvador").unwrap();
    (conn, ctx)
}

fn add_tx(
    conn: &Connection,
    ctx: &RequestContext,
    date: NaiveDate,
    amount: i64,
    kind: TxKind,
    category_id: Option<i64>,
) {
    store::insert_transaction(
        conn,
        ctx,
        &NewTransaction {
            date,
            amount: Decimal::from(amount),
            kind,
            category_id,
            is_recurring: false,
            flow_type: None,
            note: None,
        },
    )
    .unwrap();
}

#[test]
fn january_scenario_with_single_expense_category() {
    let (conn, ctx) = setup();
    let food =
        store::insert_category(&conn, &ctx, "Food", "🍞", "#aa3333", CategoryKind::Expense).unwrap();
    let salary =
        store::insert_category(&conn, &ctx, "Salary", "💼", "#33aa33", CategoryKind::Income).unwrap();

    let jan = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    add_tx(&conn, &ctx, jan(5), 100, TxKind::Expense, Some(food));
    add_tx(&conn, &ctx, jan(20), 50, TxKind::Expense, Some(food));
    add_tx(&conn, &ctx, jan(1), 500, TxKind::Income, Some(salary));

    let statement = income_statement(&conn, &ctx, jan(1), jan(31)).unwrap();

    assert_eq!(statement.revenue.total, Decimal::from(500));
    assert_eq!(statement.expenses.total, Decimal::from(150));
    assert_eq!(statement.net_income, Decimal::from(350));
    assert_eq!(statement.net_income_margin, Decimal::from(70));

    assert_eq!(statement.expenses.categories.len(), 1);
    let food_breakdown = &statement.expenses.categories[0];
    assert_eq!(food_breakdown.name, "Food");
    assert_eq!(food_breakdown.amount, Decimal::from(150));
    assert_eq!(food_breakdown.percentage, Decimal::ONE_HUNDRED);
    assert_eq!(food_breakdown.transaction_count, 2);
    assert_eq!(food_breakdown.transactions.len(), 2);
}

#[test]
fn net_income_identity_holds_with_mixed_categories() {
    let (conn, ctx) = setup();
    let jan = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    add_tx(&conn, &ctx, jan(2), 300, TxKind::Income, None);
    add_tx(&conn, &ctx, jan(3), 200, TxKind::Income, None);
    add_tx(&conn, &ctx, jan(4), 120, TxKind::Expense, None);

    let statement = income_statement(&conn, &ctx, jan(1), jan(31)).unwrap();
    assert_eq!(
        statement.net_income,
        statement.revenue.total - statement.expenses.total
    );
    let revenue_pct: Decimal = statement
        .revenue
        .categories
        .iter()
        .map(|c| c.percentage)
        .sum();
    assert_eq!(revenue_pct.round_dp(6), Decimal::ONE_HUNDRED);
}

#[test]
fn zero_revenue_yields_zero_margin() {
    let (conn, ctx) = setup();
    let jan = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    add_tx(&conn, &ctx, jan(10), 80, TxKind::Expense, None);

    let statement = income_statement(&conn, &ctx, jan(1), jan(31)).unwrap();
    assert_eq!(statement.revenue.total, Decimal::ZERO);
    assert_eq!(statement.net_income, Decimal::from(-80));
    assert_eq!(statement.net_income_margin, Decimal::ZERO);
}

#[test]
fn empty_period_is_all_zeros() {
    let (conn, ctx) = setup();
    let statement = income_statement(
        &conn,
        &ctx,
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
    )
    .unwrap();
    assert!(statement.revenue.categories.is_empty());
    assert!(statement.expenses.categories.is_empty());
    assert_eq!(statement.net_income, Decimal::ZERO);
    assert_eq!(statement.net_income_margin, Decimal::ZERO);
}
