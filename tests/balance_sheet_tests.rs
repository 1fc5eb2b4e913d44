// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::context::RequestContext;
use centavo::dates::store_day;
use centavo::db;
use centavo::reports::balance::balance_sheet;
use centavo::reports::snapshot::create_snapshot;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> (Connection, RequestContext) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let ctx = RequestContext::new(1, "America/El_Salvador").unwrap();
    (conn, ctx)
}

fn insert_asset_at(
    conn: &Connection,
    ctx: &RequestContext,
    name: &str,
    value: i64,
    kind: &str,
    created: NaiveDate,
) {
    conn.execute(
        "INSERT INTO assets(user_id, name, value, type, category, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, '', 1, ?5, ?5)",
        params![ctx.user_id, name, value.to_string(), kind, store_day(created, ctx.timezone)],
    )
    .unwrap();
}

fn insert_debt_at(
    conn: &Connection,
    ctx: &RequestContext,
    creditor: &str,
    remaining: i64,
    start: NaiveDate,
    end: Option<NaiveDate>,
) {
    conn.execute(
        "INSERT INTO debts(user_id, creditor, total_amount, remaining_amount, monthly_payment, annual_rate, type, status, start_date, end_date)
         VALUES (?1, ?2, ?3, ?3, '0', '0', 'personal', 'active', ?4, ?5)",
        params![
            ctx.user_id,
            creditor,
            remaining.to_string(),
            store_day(start, ctx.timezone),
            end.map(|d| store_day(d, ctx.timezone)),
        ],
    )
    .unwrap();
}

#[test]
fn all_liquid_assets_and_no_debts() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    insert_asset_at(&conn, &ctx, "Checking", 600, "liquid", as_of - Duration::days(30));
    insert_asset_at(&conn, &ctx, "Savings", 400, "liquid", as_of - Duration::days(10));

    let report = balance_sheet(&conn, &ctx, as_of).unwrap();
    assert!(!report.is_cached());
    let sheet = report.sheet();

    assert_eq!(sheet.assets.total, Decimal::from(1000));
    assert_eq!(sheet.assets.liquid_total, Decimal::from(1000));
    assert_eq!(sheet.liabilities.total, Decimal::ZERO);
    assert_eq!(sheet.equity, Decimal::from(1000));
    assert_eq!(sheet.net_worth, Decimal::from(1000));
    assert_eq!(sheet.ratios.debt_to_assets, Decimal::ZERO);
    // No current liabilities: the ratio is defined as zero, not a
    // division error.
    assert_eq!(sheet.ratios.current_ratio, Decimal::ZERO);

    let pct: Decimal = sheet.assets.liquid.iter().map(|l| l.percentage).sum();
    assert_eq!(pct, Decimal::ONE_HUNDRED);
}

#[test]
fn debt_horizon_is_inclusive_at_exactly_one_year() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let start = as_of - Duration::days(100);
    // Exactly on the 365-day horizon: current.
    insert_debt_at(&conn, &ctx, "Boundary", 100, start, Some(as_of + Duration::days(365)));
    // One day past: long-term.
    insert_debt_at(&conn, &ctx, "Past", 200, start, Some(as_of + Duration::days(366)));
    // Open-ended: always long-term.
    insert_debt_at(&conn, &ctx, "OpenEnded", 300, start, None);

    let sheet = balance_sheet(&conn, &ctx, as_of).unwrap().into_sheet();
    assert_eq!(sheet.liabilities.current.len(), 1);
    assert_eq!(sheet.liabilities.current[0].creditor, "Boundary");
    assert_eq!(sheet.liabilities.current_total, Decimal::from(100));
    assert_eq!(sheet.liabilities.long_term.len(), 2);
    assert_eq!(sheet.liabilities.long_term_total, Decimal::from(500));
}

#[test]
fn net_worth_identity_with_mixed_positions() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 2_000, "liquid", as_of - Duration::days(200));
    insert_asset_at(&conn, &ctx, "Car", 8_000, "illiquid", as_of - Duration::days(400));
    insert_debt_at(
        &conn,
        &ctx,
        "CarLoan",
        3_000,
        as_of - Duration::days(300),
        Some(as_of + Duration::days(200)),
    );

    let sheet = balance_sheet(&conn, &ctx, as_of).unwrap().into_sheet();
    assert_eq!(sheet.net_worth, sheet.assets.total - sheet.liabilities.total);
    assert_eq!(sheet.net_worth, sheet.equity);
    assert_eq!(sheet.net_worth, Decimal::from(7_000));
    // 3000 owed against 10000 held
    assert_eq!(sheet.ratios.debt_to_assets, Decimal::new(3, 1));
    // Liquid 2000 over current 3000
    assert_eq!(
        sheet.ratios.current_ratio.round_dp(4),
        (Decimal::from(2) / Decimal::from(3)).round_dp(4)
    );
}

#[test]
fn records_after_the_as_of_date_are_excluded() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Old", 500, "liquid", as_of);
    insert_asset_at(&conn, &ctx, "New", 900, "liquid", as_of + Duration::days(1));
    insert_debt_at(&conn, &ctx, "Later", 250, as_of + Duration::days(5), None);

    let sheet = balance_sheet(&conn, &ctx, as_of).unwrap().into_sheet();
    assert_eq!(sheet.assets.total, Decimal::from(500));
    assert_eq!(sheet.liabilities.total, Decimal::ZERO);
}

#[test]
fn exact_date_snapshot_serves_the_cached_path() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 1_500, "liquid", as_of - Duration::days(50));
    insert_debt_at(&conn, &ctx, "Loan", 400, as_of - Duration::days(20), None);

    let computed = balance_sheet(&conn, &ctx, as_of).unwrap();
    assert!(!computed.is_cached());

    create_snapshot(&conn, &ctx, as_of).unwrap();

    let cached = balance_sheet(&conn, &ctx, as_of).unwrap();
    assert!(cached.is_cached());
    let cached_sheet = cached.sheet();
    let computed_sheet = computed.sheet();
    assert_eq!(cached_sheet.assets.total, computed_sheet.assets.total);
    assert_eq!(cached_sheet.liabilities.total, computed_sheet.liabilities.total);
    assert_eq!(cached_sheet.net_worth, computed_sheet.net_worth);
    // Aggregate-only reconstruction: no per-item detail.
    assert!(cached_sheet.assets.liquid.is_empty());
    assert!(cached_sheet.liabilities.long_term.is_empty());

    // A neighbouring date still computes live.
    let other = balance_sheet(&conn, &ctx, as_of + Duration::days(1)).unwrap();
    assert!(!other.is_cached());
}

#[test]
fn stale_snapshot_is_served_as_is() {
    let (conn, ctx) = setup();
    let as_of = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 1_000, "liquid", as_of - Duration::days(50));
    create_snapshot(&conn, &ctx, as_of).unwrap();

    // Underlying data changes after the snapshot; the cached read does
    // not notice (accepted, no invalidation protocol).
    insert_asset_at(&conn, &ctx, "Windfall", 9_999, "liquid", as_of - Duration::days(5));
    let cached = balance_sheet(&conn, &ctx, as_of).unwrap();
    assert!(cached.is_cached());
    assert_eq!(cached.sheet().assets.total, Decimal::from(1_000));
}
