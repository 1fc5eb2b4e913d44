// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::context::RequestContext;
use centavo::db;
use centavo::models::{CategoryKind, Frequency, TxKind};
use centavo::reports::budget::budget_summary;
use centavo::store::{self, NewRecurring, NewTransaction};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, RequestContext) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let ctx = RequestContext::new(1, "America/El_Salvador").unwrap();
    (conn, ctx)
}

fn recurring(name: &str, amount: i64, frequency: Frequency, category: &str, ctx: &RequestContext) -> NewRecurring {
    NewRecurring {
        name: name.to_string(),
        amount: Decimal::from(amount),
        frequency,
        category: category.to_string(),
        start_date: ctx.today(),
        end_date: None,
    }
}

#[test]
fn frequencies_convert_to_monthly_equivalents() {
    let (conn, ctx) = setup();
    store::insert_income_source(
        &conn,
        &ctx,
        &recurring("Contract", 12_000, Frequency::Annual, "salary", &ctx),
    )
    .unwrap();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &recurring("Groceries", 100, Frequency::Weekly, "food", &ctx),
    )
    .unwrap();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &recurring("Gym", 50, Frequency::Biweekly, "healthcare", &ctx),
    )
    .unwrap();

    let summary = budget_summary(&conn, &ctx).unwrap();
    // 12000 / 12
    assert_eq!(summary.total_monthly_income, Decimal::from(1_000));
    // 100 * 4.33 + 50 * 2.17
    assert_eq!(summary.total_monthly_expenses, Decimal::new(54150, 2));
    assert_eq!(
        summary.available_balance,
        summary.total_monthly_income - summary.total_monthly_expenses
    );

    let food = summary
        .expenses_by_category
        .iter()
        .find(|c| c.key == "food")
        .unwrap();
    assert_eq!(food.planned, Decimal::from(433));
}

#[test]
fn zero_income_means_zero_savings_rate() {
    let (conn, ctx) = setup();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &recurring("Rent", 300, Frequency::Monthly, "housing", &ctx),
    )
    .unwrap();

    let summary = budget_summary(&conn, &ctx).unwrap();
    assert_eq!(summary.total_monthly_income, Decimal::ZERO);
    assert_eq!(summary.savings_rate, Decimal::ZERO);
    assert_eq!(summary.available_balance, Decimal::from(-300));
}

#[test]
fn savings_rate_reflects_planned_figures() {
    let (conn, ctx) = setup();
    store::insert_income_source(
        &conn,
        &ctx,
        &recurring("Job", 2_000, Frequency::Monthly, "salary", &ctx),
    )
    .unwrap();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &recurring("Rent", 500, Frequency::Monthly, "housing", &ctx),
    )
    .unwrap();

    let summary = budget_summary(&conn, &ctx).unwrap();
    assert_eq!(summary.available_balance, Decimal::from(1_500));
    assert_eq!(summary.savings_rate, Decimal::from(75));
}

#[test]
fn actuals_merge_into_planned_buckets_through_the_alias_table() {
    let (conn, ctx) = setup();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &recurring("Food budget", 400, Frequency::Monthly, "food", &ctx),
    )
    .unwrap();
    // The realized transaction's category is named "Groceries"; the
    // alias table folds it into the planned "food" bucket.
    let groceries = store::insert_category(
        &conn,
        &ctx,
        "Groceries",
        "🛒",
        "",
        CategoryKind::Expense,
    )
    .unwrap();
    store::insert_transaction(
        &conn,
        &ctx,
        &NewTransaction {
            date: ctx.today(),
            amount: Decimal::from(90),
            kind: TxKind::Expense,
            category_id: Some(groceries),
            is_recurring: false,
            flow_type: None,
            note: None,
        },
    )
    .unwrap();

    let summary = budget_summary(&conn, &ctx).unwrap();
    assert_eq!(summary.actual_monthly_expenses, Decimal::from(90));
    let food = summary
        .expenses_by_category
        .iter()
        .find(|c| c.key == "food")
        .unwrap();
    assert_eq!(food.planned, Decimal::from(400));
    assert_eq!(food.actual, Decimal::from(90));
    // No stray "groceries" bucket.
    assert!(summary.expenses_by_category.iter().all(|c| c.key != "groceries"));
}

#[test]
fn unmapped_category_names_get_their_own_bucket() {
    let (conn, ctx) = setup();
    let hobby =
        store::insert_category(&conn, &ctx, "Falconry", "🦅", "", CategoryKind::Expense).unwrap();
    store::insert_transaction(
        &conn,
        &ctx,
        &NewTransaction {
            date: ctx.today(),
            amount: Decimal::from(60),
            kind: TxKind::Expense,
            category_id: Some(hobby),
            is_recurring: false,
            flow_type: None,
            note: None,
        },
    )
    .unwrap();

    let summary = budget_summary(&conn, &ctx).unwrap();
    let bucket = summary
        .expenses_by_category
        .iter()
        .find(|c| c.key == "falconry")
        .expect("ad-hoc bucket for unmapped name");
    assert_eq!(bucket.planned, Decimal::ZERO);
    assert_eq!(bucket.actual, Decimal::from(60));
}
