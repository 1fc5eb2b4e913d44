// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Repository layer over SQLite. Every date-bearing field crosses the
//! wall-clock/UTC boundary here and nowhere else: writes run local
//! calendar days through `dates::to_storage_instant`, reads run stored
//! instants back through `dates::from_storage_instant`, and local-date
//! range filters become half-open UTC instant intervals. Callers only
//! ever see `NaiveDate`.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::context::RequestContext;
use crate::dates::{day_range_instants, end_of_day_instant, load_day, store_day};
use crate::models::{
    Account, Asset, AssetKind, CategoryKind, Debt, DebtStatus, FinancialSnapshot, FlowType,
    Frequency, IncomeSource, RecurringExpense, Transaction, TransactionCategory, TxKind,
};

fn parse_stored_decimal(raw: &str, what: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .with_context(|| format!("Invalid stored {} '{}'", what, raw))
}

fn load_optional_day(raw: Option<String>, ctx: &RequestContext) -> Result<Option<NaiveDate>> {
    raw.map(|s| load_day(&s, ctx.timezone)).transpose()
}

// ---------------------------------------------------------------------------
// Categories

pub fn insert_category(
    conn: &Connection,
    ctx: &RequestContext,
    name: &str,
    emoji: &str,
    color: &str,
    kind: CategoryKind,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transaction_categories(user_id, name, emoji, color, type)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![ctx.user_id, name, emoji, color, kind.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_categories(conn: &Connection, ctx: &RequestContext) -> Result<Vec<TransactionCategory>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, emoji, color, type
         FROM transaction_categories WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![ctx.user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(5)?;
        out.push(TransactionCategory {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            emoji: r.get(3)?,
            color: r.get(4)?,
            kind: CategoryKind::from_str(&kind)?,
        });
    }
    Ok(out)
}

pub fn category_map(
    conn: &Connection,
    ctx: &RequestContext,
) -> Result<HashMap<i64, TransactionCategory>> {
    Ok(list_categories(conn, ctx)?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

// ---------------------------------------------------------------------------
// Transactions

pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category_id: Option<i64>,
    pub is_recurring: bool,
    pub flow_type: Option<FlowType>,
    pub note: Option<String>,
}

pub fn insert_transaction(
    conn: &Connection,
    ctx: &RequestContext,
    tx: &NewTransaction,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(user_id, date, amount, type, category_id, is_recurring, flow_type, note)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            ctx.user_id,
            store_day(tx.date, ctx.timezone),
            tx.amount.to_string(),
            tx.kind.as_str(),
            tx.category_id,
            tx.is_recurring as i64,
            tx.flow_type.map(|f| f.as_str()),
            tx.note,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect_transactions(
    conn: &Connection,
    ctx: &RequestContext,
    sql: &str,
    bind: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(bind.iter().copied()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date_raw: String = r.get(2)?;
        let amount_raw: String = r.get(3)?;
        let kind_raw: String = r.get(4)?;
        let flow_raw: Option<String> = r.get(7)?;
        out.push(Transaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            date: load_day(&date_raw, ctx.timezone)?,
            amount: parse_stored_decimal(&amount_raw, "amount")?,
            kind: TxKind::from_str(&kind_raw)?,
            category_id: r.get(5)?,
            is_recurring: r.get::<_, i64>(6)? != 0,
            flow_type: flow_raw.as_deref().map(FlowType::from_str).transpose()?,
            note: r.get(8)?,
        });
    }
    Ok(out)
}

const TX_COLUMNS: &str =
    "id, user_id, date, amount, type, category_id, is_recurring, flow_type, note";

/// Transactions whose local calendar day falls in the inclusive range
/// `[start, end]`.
pub fn transactions_between(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    let (lo, hi) = day_range_instants(start, end, ctx.timezone);
    let sql = format!(
        "SELECT {} FROM transactions WHERE user_id=? AND date>=? AND date<? ORDER BY date, id",
        TX_COLUMNS
    );
    collect_transactions(conn, ctx, &sql, &[&ctx.user_id, &lo, &hi])
}

pub fn recent_transactions(
    conn: &Connection,
    ctx: &RequestContext,
    limit: usize,
) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE user_id=? ORDER BY date DESC, id DESC LIMIT ?",
        TX_COLUMNS
    );
    let limit = limit as i64;
    collect_transactions(conn, ctx, &sql, &[&ctx.user_id, &limit])
}

// ---------------------------------------------------------------------------
// Recurring income / expenses

pub struct NewRecurring {
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub category: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

fn insert_recurring(
    conn: &Connection,
    ctx: &RequestContext,
    table: &str,
    rec: &NewRecurring,
) -> Result<i64> {
    let sql = format!(
        "INSERT INTO {}(user_id, name, amount, frequency, category, is_active, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
        table
    );
    conn.execute(
        &sql,
        params![
            ctx.user_id,
            rec.name,
            rec.amount.to_string(),
            rec.frequency.as_str(),
            rec.category,
            store_day(rec.start_date, ctx.timezone),
            rec.end_date.map(|d| store_day(d, ctx.timezone)),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_income_source(
    conn: &Connection,
    ctx: &RequestContext,
    rec: &NewRecurring,
) -> Result<i64> {
    insert_recurring(conn, ctx, "income_sources", rec)
}

pub fn insert_recurring_expense(
    conn: &Connection,
    ctx: &RequestContext,
    rec: &NewRecurring,
) -> Result<i64> {
    insert_recurring(conn, ctx, "recurring_expenses", rec)
}

struct RecurringRow {
    id: i64,
    user_id: i64,
    name: String,
    amount: Decimal,
    frequency: Frequency,
    category: String,
    is_active: bool,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
}

fn collect_recurring(
    conn: &Connection,
    ctx: &RequestContext,
    table: &str,
    active_only: bool,
) -> Result<Vec<RecurringRow>> {
    let mut sql = format!(
        "SELECT id, user_id, name, amount, frequency, category, is_active, start_date, end_date
         FROM {} WHERE user_id=?1",
        table
    );
    if active_only {
        sql.push_str(" AND is_active=1");
    }
    sql.push_str(" ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![ctx.user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount_raw: String = r.get(3)?;
        let freq_raw: String = r.get(4)?;
        let start_raw: String = r.get(7)?;
        let end_raw: Option<String> = r.get(8)?;
        out.push(RecurringRow {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            amount: parse_stored_decimal(&amount_raw, "amount")?,
            frequency: Frequency::from_str(&freq_raw)?,
            category: r.get(5)?,
            is_active: r.get::<_, i64>(6)? != 0,
            start_date: load_day(&start_raw, ctx.timezone)?,
            end_date: load_optional_day(end_raw, ctx)?,
        });
    }
    Ok(out)
}

pub fn active_income_sources(conn: &Connection, ctx: &RequestContext) -> Result<Vec<IncomeSource>> {
    Ok(collect_recurring(conn, ctx, "income_sources", true)?
        .into_iter()
        .map(|r| IncomeSource {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            amount: r.amount,
            frequency: r.frequency,
            category: r.category,
            is_active: r.is_active,
            start_date: r.start_date,
            end_date: r.end_date,
        })
        .collect())
}

pub fn active_recurring_expenses(
    conn: &Connection,
    ctx: &RequestContext,
) -> Result<Vec<RecurringExpense>> {
    Ok(collect_recurring(conn, ctx, "recurring_expenses", true)?
        .into_iter()
        .map(|r| RecurringExpense {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            amount: r.amount,
            frequency: r.frequency,
            category: r.category,
            is_active: r.is_active,
            start_date: r.start_date,
            end_date: r.end_date,
        })
        .collect())
}

/// Deactivate a recurring record, optionally stamping its end date.
pub fn end_recurring(
    conn: &Connection,
    ctx: &RequestContext,
    table_is_income: bool,
    id: i64,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    let table = if table_is_income { "income_sources" } else { "recurring_expenses" };
    let sql = format!("UPDATE {} SET is_active=0, end_date=COALESCE(?1, end_date) WHERE user_id=?2 AND id=?3", table);
    let changed = conn.execute(
        &sql,
        params![end_date.map(|d| store_day(d, ctx.timezone)), ctx.user_id, id],
    )?;
    if changed == 0 {
        anyhow::bail!("No recurring record with id {}", id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Assets

pub struct NewAsset {
    pub name: String,
    pub value: Decimal,
    pub kind: AssetKind,
    pub category: String,
    pub purchase_date: Option<NaiveDate>,
}

pub fn insert_asset(conn: &Connection, ctx: &RequestContext, asset: &NewAsset) -> Result<i64> {
    let today = store_day(ctx.today(), ctx.timezone);
    conn.execute(
        "INSERT INTO assets(user_id, name, value, type, category, is_active, purchase_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7, ?7)",
        params![
            ctx.user_id,
            asset.name,
            asset.value.to_string(),
            asset.kind.as_str(),
            asset.category,
            asset.purchase_date.map(|d| store_day(d, ctx.timezone)),
            today,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect_assets(
    conn: &Connection,
    ctx: &RequestContext,
    where_clause: &str,
    bind: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Asset>> {
    let sql = format!(
        "SELECT id, user_id, name, value, type, category, is_active, purchase_date, created_at, updated_at
         FROM assets WHERE user_id=? {} ORDER BY name",
        where_clause
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut all_bind: Vec<&dyn rusqlite::ToSql> = vec![&ctx.user_id];
    all_bind.extend_from_slice(bind);
    let mut rows = stmt.query(rusqlite::params_from_iter(all_bind.iter().copied()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let value_raw: String = r.get(3)?;
        let kind_raw: String = r.get(4)?;
        let purchase_raw: Option<String> = r.get(7)?;
        let created_raw: String = r.get(8)?;
        let updated_raw: String = r.get(9)?;
        out.push(Asset {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            value: parse_stored_decimal(&value_raw, "value")?,
            kind: AssetKind::from_str(&kind_raw)?,
            category: r.get(5)?,
            is_active: r.get::<_, i64>(6)? != 0,
            purchase_date: load_optional_day(purchase_raw, ctx)?,
            created_at: load_day(&created_raw, ctx.timezone)?,
            updated_at: load_day(&updated_raw, ctx.timezone)?,
        });
    }
    Ok(out)
}

pub fn list_assets(
    conn: &Connection,
    ctx: &RequestContext,
    include_inactive: bool,
) -> Result<Vec<Asset>> {
    if include_inactive {
        collect_assets(conn, ctx, "", &[])
    } else {
        collect_assets(conn, ctx, "AND is_active=1", &[])
    }
}

/// Active assets that existed on or before the local day `as_of`.
pub fn active_assets_through(
    conn: &Connection,
    ctx: &RequestContext,
    as_of: NaiveDate,
) -> Result<Vec<Asset>> {
    let hi = end_of_day_instant(as_of, ctx.timezone);
    collect_assets(conn, ctx, "AND is_active=1 AND created_at<?", &[&hi])
}

/// Assets created within the inclusive local-day range (purchases for
/// the investing cash flow).
pub fn assets_created_between(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Asset>> {
    let (lo, hi) = day_range_instants(start, end, ctx.timezone);
    collect_assets(conn, ctx, "AND created_at>=? AND created_at<?", &[&lo, &hi])
}

/// Assets soft-deleted within the range: an is_active flip with
/// updated_at in the window is read as a sale at the last stored value.
pub fn assets_deactivated_between(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Asset>> {
    let (lo, hi) = day_range_instants(start, end, ctx.timezone);
    collect_assets(
        conn,
        ctx,
        "AND is_active=0 AND updated_at>=? AND updated_at<?",
        &[&lo, &hi],
    )
}

pub fn sell_asset(conn: &Connection, ctx: &RequestContext, id: i64) -> Result<()> {
    let today = store_day(ctx.today(), ctx.timezone);
    let changed = conn.execute(
        "UPDATE assets SET is_active=0, updated_at=?1 WHERE user_id=?2 AND id=?3 AND is_active=1",
        params![today, ctx.user_id, id],
    )?;
    if changed == 0 {
        anyhow::bail!("No active asset with id {}", id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Debts

pub struct NewDebt {
    pub creditor: String,
    pub total_amount: Decimal,
    pub monthly_payment: Decimal,
    pub annual_rate: Decimal,
    pub kind: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

pub fn insert_debt(conn: &Connection, ctx: &RequestContext, debt: &NewDebt) -> Result<i64> {
    conn.execute(
        "INSERT INTO debts(user_id, creditor, total_amount, remaining_amount, monthly_payment, annual_rate, type, status, start_date, end_date)
         VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, 'active', ?7, ?8)",
        params![
            ctx.user_id,
            debt.creditor,
            debt.total_amount.to_string(),
            debt.monthly_payment.to_string(),
            debt.annual_rate.to_string(),
            debt.kind,
            store_day(debt.start_date, ctx.timezone),
            debt.end_date.map(|d| store_day(d, ctx.timezone)),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn collect_debts(
    conn: &Connection,
    ctx: &RequestContext,
    where_clause: &str,
    bind: &[&dyn rusqlite::ToSql],
) -> Result<Vec<Debt>> {
    let sql = format!(
        "SELECT id, user_id, creditor, total_amount, remaining_amount, monthly_payment, annual_rate, type, status, start_date, end_date, paid_date
         FROM debts WHERE user_id=? {} ORDER BY creditor",
        where_clause
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut all_bind: Vec<&dyn rusqlite::ToSql> = vec![&ctx.user_id];
    all_bind.extend_from_slice(bind);
    let mut rows = stmt.query(rusqlite::params_from_iter(all_bind.iter().copied()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let total_raw: String = r.get(3)?;
        let remaining_raw: String = r.get(4)?;
        let payment_raw: String = r.get(5)?;
        let rate_raw: String = r.get(6)?;
        let status_raw: String = r.get(8)?;
        let start_raw: String = r.get(9)?;
        let end_raw: Option<String> = r.get(10)?;
        let paid_raw: Option<String> = r.get(11)?;
        out.push(Debt {
            id: r.get(0)?,
            user_id: r.get(1)?,
            creditor: r.get(2)?,
            total_amount: parse_stored_decimal(&total_raw, "total_amount")?,
            remaining_amount: parse_stored_decimal(&remaining_raw, "remaining_amount")?,
            monthly_payment: parse_stored_decimal(&payment_raw, "monthly_payment")?,
            annual_rate: parse_stored_decimal(&rate_raw, "annual_rate")?,
            kind: r.get(7)?,
            status: DebtStatus::from_str(&status_raw)?,
            start_date: load_day(&start_raw, ctx.timezone)?,
            end_date: load_optional_day(end_raw, ctx)?,
            paid_date: load_optional_day(paid_raw, ctx)?,
        });
    }
    Ok(out)
}

pub fn list_debts(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Debt>> {
    collect_debts(conn, ctx, "", &[])
}

pub fn active_debts(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Debt>> {
    collect_debts(conn, ctx, "AND status='active'", &[])
}

/// Active debts that started on or before the local day `as_of`.
pub fn active_debts_through(
    conn: &Connection,
    ctx: &RequestContext,
    as_of: NaiveDate,
) -> Result<Vec<Debt>> {
    let hi = end_of_day_instant(as_of, ctx.timezone);
    collect_debts(conn, ctx, "AND status='active' AND start_date<?", &[&hi])
}

/// Debts originated within the range (borrowing for the financing flow).
pub fn debts_started_between(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Debt>> {
    let (lo, hi) = day_range_instants(start, end, ctx.timezone);
    collect_debts(conn, ctx, "AND start_date>=? AND start_date<?", &[&lo, &hi])
}

/// Debts retired within the range (repayment for the financing flow).
pub fn debts_paid_between(
    conn: &Connection,
    ctx: &RequestContext,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Debt>> {
    let (lo, hi) = day_range_instants(start, end, ctx.timezone);
    collect_debts(
        conn,
        ctx,
        "AND status='paid' AND paid_date>=? AND paid_date<?",
        &[&lo, &hi],
    )
}

pub fn payoff_debt(
    conn: &Connection,
    ctx: &RequestContext,
    id: i64,
    paid_date: NaiveDate,
) -> Result<()> {
    let changed = conn.execute(
        "UPDATE debts SET status='paid', remaining_amount='0', paid_date=?1
         WHERE user_id=?2 AND id=?3 AND status='active'",
        params![store_day(paid_date, ctx.timezone), ctx.user_id, id],
    )?;
    if changed == 0 {
        anyhow::bail!("No active debt with id {}", id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Accounts

pub fn insert_account(
    conn: &Connection,
    ctx: &RequestContext,
    name: &str,
    balance: Decimal,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO accounts(user_id, name, current_balance, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![ctx.user_id, name, balance.to_string(), store_day(ctx.today(), ctx.timezone)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_accounts(conn: &Connection, ctx: &RequestContext) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, current_balance, is_active, created_at
         FROM accounts WHERE user_id=?1 ORDER BY name",
    )?;
    let mut rows = stmt.query(params![ctx.user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let balance_raw: String = r.get(3)?;
        let created_raw: String = r.get(5)?;
        out.push(Account {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            current_balance: parse_stored_decimal(&balance_raw, "balance")?,
            is_active: r.get::<_, i64>(4)? != 0,
            created_at: load_day(&created_raw, ctx.timezone)?,
        });
    }
    Ok(out)
}

pub fn close_account(conn: &Connection, ctx: &RequestContext, name: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE accounts SET is_active=0 WHERE user_id=?1 AND name=?2 AND is_active=1",
        params![ctx.user_id, name],
    )?;
    if changed == 0 {
        anyhow::bail!("No active account named '{}'", name);
    }
    Ok(())
}

/// Sum of balances across active accounts that existed on or before the
/// local day `through`. Balances are current values, not historical; an
/// accepted approximation for the cash basis.
pub fn cash_balance_through(
    conn: &Connection,
    ctx: &RequestContext,
    through: NaiveDate,
) -> Result<Decimal> {
    let hi = end_of_day_instant(through, ctx.timezone);
    let mut stmt = conn.prepare(
        "SELECT current_balance FROM accounts
         WHERE user_id=?1 AND is_active=1 AND created_at<?2",
    )?;
    let mut rows = stmt.query(params![ctx.user_id, hi])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = rows.next()? {
        let raw: String = r.get(0)?;
        total += parse_stored_decimal(&raw, "balance")?;
    }
    Ok(total)
}

// ---------------------------------------------------------------------------
// Snapshots

pub fn upsert_snapshot(
    conn: &Connection,
    ctx: &RequestContext,
    snap: &FinancialSnapshot,
) -> Result<()> {
    conn.execute(
        "INSERT INTO financial_snapshots(user_id, date, total_assets, liquid_assets, illiquid_assets,
             total_liabilities, short_term_liabilities, long_term_liabilities, equity, cash_balance, net_worth)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(user_id, date) DO UPDATE SET
             total_assets=excluded.total_assets,
             liquid_assets=excluded.liquid_assets,
             illiquid_assets=excluded.illiquid_assets,
             total_liabilities=excluded.total_liabilities,
             short_term_liabilities=excluded.short_term_liabilities,
             long_term_liabilities=excluded.long_term_liabilities,
             equity=excluded.equity,
             cash_balance=excluded.cash_balance,
             net_worth=excluded.net_worth",
        params![
            ctx.user_id,
            store_day(snap.date, ctx.timezone),
            snap.total_assets.to_string(),
            snap.liquid_assets.to_string(),
            snap.illiquid_assets.to_string(),
            snap.total_liabilities.to_string(),
            snap.short_term_liabilities.to_string(),
            snap.long_term_liabilities.to_string(),
            snap.equity.to_string(),
            snap.cash_balance.to_string(),
            snap.net_worth.to_string(),
        ],
    )?;
    Ok(())
}

fn snapshot_from_row(r: &rusqlite::Row<'_>, ctx: &RequestContext) -> Result<FinancialSnapshot> {
    let date_raw: String = r.get(2)?;
    let dec = |idx: usize| -> Result<Decimal> {
        let raw: String = r.get(idx)?;
        parse_stored_decimal(&raw, "snapshot field")
    };
    Ok(FinancialSnapshot {
        id: r.get(0)?,
        user_id: r.get(1)?,
        date: load_day(&date_raw, ctx.timezone)?,
        total_assets: dec(3)?,
        liquid_assets: dec(4)?,
        illiquid_assets: dec(5)?,
        total_liabilities: dec(6)?,
        short_term_liabilities: dec(7)?,
        long_term_liabilities: dec(8)?,
        equity: dec(9)?,
        cash_balance: dec(10)?,
        net_worth: dec(11)?,
    })
}

const SNAPSHOT_COLUMNS: &str = "id, user_id, date, total_assets, liquid_assets, illiquid_assets, total_liabilities, short_term_liabilities, long_term_liabilities, equity, cash_balance, net_worth";

pub fn snapshot_for_date(
    conn: &Connection,
    ctx: &RequestContext,
    date: NaiveDate,
) -> Result<Option<FinancialSnapshot>> {
    let sql = format!(
        "SELECT {} FROM financial_snapshots WHERE user_id=?1 AND date=?2",
        SNAPSHOT_COLUMNS
    );
    let stored = store_day(date, ctx.timezone);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![ctx.user_id, stored])?;
    match rows.next()? {
        Some(r) => Ok(Some(snapshot_from_row(r, ctx)?)),
        None => Ok(None),
    }
}

pub fn list_snapshots(conn: &Connection, ctx: &RequestContext) -> Result<Vec<FinancialSnapshot>> {
    let sql = format!(
        "SELECT {} FROM financial_snapshots WHERE user_id=?1 ORDER BY date",
        SNAPSHOT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![ctx.user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(snapshot_from_row(r, ctx)?);
    }
    Ok(out)
}

/// Raw stored instants for doctor-style scans; bypasses day conversion
/// on purpose so malformed values can be reported instead of failing.
pub fn raw_date_fields(conn: &Connection, ctx: &RequestContext) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    let queries = [
        "SELECT 'transactions#'||id, date FROM transactions WHERE user_id=?1",
        "SELECT 'assets#'||id, created_at FROM assets WHERE user_id=?1",
        "SELECT 'debts#'||id, start_date FROM debts WHERE user_id=?1",
        "SELECT 'accounts#'||id, created_at FROM accounts WHERE user_id=?1",
    ];
    for sql in queries {
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params![ctx.user_id])?;
        while let Some(r) = rows.next()? {
            out.push((r.get(0)?, r.get(1)?));
        }
    }
    Ok(out)
}
