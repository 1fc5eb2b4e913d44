// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Centavo", "centavo"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("centavo.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- All *date* columns hold UTC instants of local midnight in the
    -- request timezone ('YYYY-MM-DDTHH:MM:SSZ'); conversion happens in
    -- the store layer only.

    CREATE TABLE IF NOT EXISTS transaction_categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        emoji TEXT NOT NULL DEFAULT '',
        color TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL CHECK(type IN ('income','expense','both')),
        UNIQUE(user_id, name)
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category_id INTEGER,
        is_recurring INTEGER NOT NULL DEFAULT 0,
        flow_type TEXT CHECK(flow_type IN ('operating','investing','financing')),
        note TEXT,
        FOREIGN KEY(category_id) REFERENCES transaction_categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_user_date ON transactions(user_id, date);

    CREATE TABLE IF NOT EXISTS income_sources(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('weekly','biweekly','monthly','annual')),
        category TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        start_date TEXT NOT NULL,
        end_date TEXT
    );

    CREATE TABLE IF NOT EXISTS recurring_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        frequency TEXT NOT NULL CHECK(frequency IN ('weekly','biweekly','monthly','annual')),
        category TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        start_date TEXT NOT NULL,
        end_date TEXT
    );

    CREATE TABLE IF NOT EXISTS assets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        value TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('liquid','illiquid')),
        category TEXT NOT NULL DEFAULT '',
        is_active INTEGER NOT NULL DEFAULT 1,
        purchase_date TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_assets_user_created ON assets(user_id, created_at);

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        creditor TEXT NOT NULL,
        total_amount TEXT NOT NULL,
        remaining_amount TEXT NOT NULL,
        monthly_payment TEXT NOT NULL DEFAULT '0',
        annual_rate TEXT NOT NULL DEFAULT '0',
        type TEXT NOT NULL DEFAULT 'personal',
        status TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','paid')),
        start_date TEXT NOT NULL,
        end_date TEXT,
        paid_date TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_debts_user_start ON debts(user_id, start_date);

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL,
        current_balance TEXT NOT NULL DEFAULT '0',
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        UNIQUE(user_id, name)
    );

    CREATE TABLE IF NOT EXISTS financial_snapshots(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL DEFAULT 1,
        date TEXT NOT NULL,
        total_assets TEXT NOT NULL,
        liquid_assets TEXT NOT NULL,
        illiquid_assets TEXT NOT NULL,
        total_liabilities TEXT NOT NULL,
        short_term_liabilities TEXT NOT NULL,
        long_term_liabilities TEXT NOT NULL,
        equity TEXT NOT NULL,
        cash_balance TEXT NOT NULL,
        net_worth TEXT NOT NULL,
        UNIQUE(user_id, date)
    );
    "#,
    )?;
    Ok(())
}
