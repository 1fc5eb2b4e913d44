// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::context::RequestContext;
use centavo::dates::store_day;
use centavo::db;
use centavo::reports::snapshot::create_snapshot;
use centavo::store;
use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> (Connection, RequestContext) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let ctx = RequestContext::new(1, "America/El_Salvador").unwrap();
    (conn, ctx)
}

fn insert_asset_at(conn: &Connection, ctx: &RequestContext, name: &str, value: i64, created: NaiveDate) {
    conn.execute(
        "INSERT INTO assets(user_id, name, value, type, category, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, 'liquid', '', 1, ?4, ?4)",
        params![ctx.user_id, name, value.to_string(), store_day(created, ctx.timezone)],
    )
    .unwrap();
}

fn insert_account_at(conn: &Connection, ctx: &RequestContext, name: &str, balance: i64, created: NaiveDate) {
    conn.execute(
        "INSERT INTO accounts(user_id, name, current_balance, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![ctx.user_id, name, balance.to_string(), store_day(created, ctx.timezone)],
    )
    .unwrap();
}

#[test]
fn snapshot_carries_the_computed_aggregates_and_cash() {
    let (conn, ctx) = setup();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 1_200, date - Duration::days(60));
    insert_account_at(&conn, &ctx, "Checking", 800, date - Duration::days(60));

    let snap = create_snapshot(&conn, &ctx, date).unwrap();
    assert!(snap.id > 0);
    assert_eq!(snap.date, date);
    assert_eq!(snap.total_assets, Decimal::from(1_200));
    assert_eq!(snap.liquid_assets, Decimal::from(1_200));
    assert_eq!(snap.total_liabilities, Decimal::ZERO);
    assert_eq!(snap.cash_balance, Decimal::from(800));
    assert_eq!(snap.net_worth, snap.total_assets - snap.total_liabilities);
    assert_eq!(snap.equity, snap.net_worth);
}

#[test]
fn recreating_a_snapshot_overwrites_the_same_row() {
    let (conn, ctx) = setup();
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 1_000, date - Duration::days(30));
    create_snapshot(&conn, &ctx, date).unwrap();

    // More history arrives, then the snapshot is rebuilt for the same
    // date: still one row per (user, date), now with the new figures.
    insert_asset_at(&conn, &ctx, "Found", 500, date - Duration::days(5));
    let snap = create_snapshot(&conn, &ctx, date).unwrap();
    assert_eq!(snap.total_assets, Decimal::from(1_500));

    let all = store::list_snapshots(&conn, &ctx).unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn snapshots_list_in_date_order_per_user() {
    let (conn, ctx) = setup();
    let base = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    insert_asset_at(&conn, &ctx, "Cash", 100, base - Duration::days(90));
    create_snapshot(&conn, &ctx, base + Duration::days(14)).unwrap();
    create_snapshot(&conn, &ctx, base).unwrap();

    let all = store::list_snapshots(&conn, &ctx).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].date, base);
    assert_eq!(all[1].date, base + Duration::days(14));

    let other = RequestContext::new(2, "America/El_Salvador").unwrap();
    assert!(store::list_snapshots(&conn, &other).unwrap().is_empty());
}
