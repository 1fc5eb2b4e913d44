// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::context::RequestContext;
use centavo::db;
use centavo::models::{AssetKind, Frequency};
use centavo::reports::kpi::financial_kpis;
use centavo::store::{self, NewAsset, NewDebt, NewRecurring};
use chrono::Duration;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, RequestContext) {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let ctx = RequestContext::new(1, "America/El_Salvador").unwrap();
    (conn, ctx)
}

fn asset(name: &str, value: i64, kind: AssetKind) -> NewAsset {
    NewAsset {
        name: name.to_string(),
        value: Decimal::from(value),
        kind,
        category: String::new(),
        purchase_date: None,
    }
}

fn debt(ctx: &RequestContext, creditor: &str, total: i64, payment: i64, kind: &str) -> NewDebt {
    NewDebt {
        creditor: creditor.to_string(),
        total_amount: Decimal::from(total),
        monthly_payment: Decimal::from(payment),
        annual_rate: Decimal::ZERO,
        kind: kind.to_string(),
        start_date: ctx.today() - Duration::days(30),
        end_date: None,
    }
}

#[test]
fn composes_assets_debts_and_budget_into_one_figure_set() {
    let (conn, ctx) = setup();
    store::insert_asset(&conn, &ctx, &asset("Checking", 600, AssetKind::Liquid)).unwrap();
    store::insert_asset(&conn, &ctx, &asset("House", 400, AssetKind::Illiquid)).unwrap();
    store::insert_debt(&conn, &ctx, &debt(&ctx, "Bank", 300, 40, "mortgage")).unwrap();
    store::insert_debt(&conn, &ctx, &debt(&ctx, "Card", 100, 10, "credit-card")).unwrap();
    store::insert_recurring_expense(
        &conn,
        &ctx,
        &NewRecurring {
            name: "Rent".to_string(),
            amount: Decimal::from(150),
            frequency: Frequency::Monthly,
            category: "housing".to_string(),
            start_date: ctx.today(),
            end_date: None,
        },
    )
    .unwrap();

    let kpis = financial_kpis(&conn, &ctx).unwrap();
    assert_eq!(kpis.total_assets, Decimal::from(1_000));
    assert_eq!(kpis.liquid_percentage, Decimal::from(60));
    assert_eq!(kpis.illiquid_percentage, Decimal::from(40));
    assert_eq!(kpis.total_debt, Decimal::from(400));
    assert_eq!(kpis.monthly_debt_payments, Decimal::from(50));

    // Debt distribution sums to 100% of total debt.
    let pct: Decimal = kpis.debt_by_type.iter().map(|g| g.percentage).sum();
    assert_eq!(pct, Decimal::ONE_HUNDRED);
    assert_eq!(kpis.debt_by_type[0].key, "mortgage");
    assert_eq!(kpis.debt_by_type[0].amount, Decimal::from(300));

    // 600 liquid over (150 planned expenses + 50 debt payments)
    assert_eq!(kpis.solvency_ratio, Decimal::from(3));
}

#[test]
fn solvency_ratio_is_zero_when_there_are_no_obligations() {
    let (conn, ctx) = setup();
    store::insert_asset(&conn, &ctx, &asset("Cash", 500, AssetKind::Liquid)).unwrap();

    let kpis = financial_kpis(&conn, &ctx).unwrap();
    assert_eq!(kpis.total_monthly_expenses, Decimal::ZERO);
    assert_eq!(kpis.monthly_debt_payments, Decimal::ZERO);
    assert_eq!(kpis.solvency_ratio, Decimal::ZERO);
}

#[test]
fn sold_assets_are_excluded_from_the_asset_figures() {
    let (conn, ctx) = setup();
    store::insert_asset(&conn, &ctx, &asset("Kept", 200, AssetKind::Liquid)).unwrap();
    let sold = store::insert_asset(&conn, &ctx, &asset("Sold", 800, AssetKind::Liquid)).unwrap();
    store::sell_asset(&conn, &ctx, sold).unwrap();

    let kpis = financial_kpis(&conn, &ctx).unwrap();
    assert_eq!(kpis.total_assets, Decimal::from(200));
    assert_eq!(kpis.liquid_percentage, Decimal::ONE_HUNDRED);
}
