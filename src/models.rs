// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Error, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl FromStr for TxKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(anyhow!("Invalid transaction type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    Operating,
    Investing,
    Financing,
}

impl FlowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowType::Operating => "operating",
            FlowType::Investing => "investing",
            FlowType::Financing => "financing",
        }
    }
}

impl FromStr for FlowType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "operating" => Ok(FlowType::Operating),
            "investing" => Ok(FlowType::Investing),
            "financing" => Ok(FlowType::Financing),
            other => Err(anyhow!(
                "Invalid flow type '{}', expected operating|investing|financing",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Both,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
            CategoryKind::Both => "both",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            "both" => Ok(CategoryKind::Both),
            other => Err(anyhow!("Invalid category type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Annual,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Annual => "annual",
        }
    }

    /// Average occurrences per month. Approximate multipliers (weekly
    /// 4.33, biweekly 2.17), not calendar-exact.
    pub fn monthly_equivalent(&self, amount: Decimal) -> Decimal {
        match self {
            Frequency::Weekly => amount * Decimal::new(433, 2),
            Frequency::Biweekly => amount * Decimal::new(217, 2),
            Frequency::Monthly => amount,
            Frequency::Annual => amount / Decimal::from(12),
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "annual" => Ok(Frequency::Annual),
            other => Err(anyhow!(
                "Invalid frequency '{}', expected weekly|biweekly|monthly|annual",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Liquid,
    Illiquid,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Liquid => "liquid",
            AssetKind::Illiquid => "illiquid",
        }
    }
}

impl FromStr for AssetKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "liquid" => Ok(AssetKind::Liquid),
            "illiquid" => Ok(AssetKind::Illiquid),
            other => Err(anyhow!(
                "Invalid asset type '{}', expected liquid|illiquid",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    Active,
    Paid,
}

impl DebtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Active => "active",
            DebtStatus::Paid => "paid",
        }
    }
}

impl FromStr for DebtStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(DebtStatus::Active),
            "paid" => Ok(DebtStatus::Paid),
            other => Err(anyhow!("Invalid debt status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCategory {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub kind: CategoryKind,
}

/// A realized transaction. `date` is a wall-clock calendar day in the
/// request timezone; the UTC storage form never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TxKind,
    pub category_id: Option<i64>,
    pub is_recurring: bool,
    pub flow_type: Option<FlowType>,
    pub note: Option<String>,
}

/// Planned recurring cash flow, income side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub category: String,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Planned recurring cash flow, expense side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub category: String,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Assets are soft-deleted (is_active=false), never removed, so
/// historical balance sheets remain reconstructable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub value: Decimal,
    pub kind: AssetKind,
    pub category: String,
    pub is_active: bool,
    pub purchase_date: Option<NaiveDate>,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub user_id: i64,
    pub creditor: String,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    pub monthly_payment: Decimal,
    pub annual_rate: Decimal,
    pub kind: String,
    pub status: DebtStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
}

/// Balance-bearing account; the sum of active balances is the cash
/// basis for the cash flow statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub current_balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDate,
}

/// Point-in-time cache of a computed balance sheet, one per (user, date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_assets: Decimal,
    pub liquid_assets: Decimal,
    pub illiquid_assets: Decimal,
    pub total_liabilities: Decimal,
    pub short_term_liabilities: Decimal,
    pub long_term_liabilities: Decimal,
    pub equity: Decimal,
    pub cash_balance: Decimal,
    pub net_worth: Decimal,
}
