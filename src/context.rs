// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use rusqlite::Connection;
use thiserror::Error;

/// Zone assumed whenever no timezone has been configured. A missing or
/// unparseable setting must never block an operation, so lookups fall
/// back here silently.
pub const DEFAULT_TIMEZONE: &str = "America/El_Salvador";

pub const DEFAULT_USER: i64 = 1;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Invalid timezone '{0}', expected an IANA name like America/New_York")]
    InvalidTimezone(String),
}

/// The acting user and their IANA timezone, threaded explicitly through
/// every store and report call. All wall-clock/UTC conversion decisions
/// flow from this struct; nothing consults ambient or global state.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub user_id: i64,
    pub timezone: Tz,
}

impl RequestContext {
    pub fn new(user_id: i64, timezone: &str) -> Result<Self, ContextError> {
        let tz: Tz = timezone
            .trim()
            .parse()
            .map_err(|_| ContextError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self { user_id, timezone: tz })
    }

    pub fn with_default_timezone(user_id: i64) -> Self {
        let tz: Tz = DEFAULT_TIMEZONE
            .parse()
            .unwrap_or(chrono_tz::America::El_Salvador);
        Self { user_id, timezone: tz }
    }

    /// Build the context from the settings table. Absent or invalid
    /// values degrade to defaults rather than failing.
    pub fn from_settings(conn: &Connection) -> Result<Self> {
        let user_id = crate::utils::get_setting(conn, "active_user")?
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_USER);
        let ctx = match crate::utils::get_setting(conn, "timezone")? {
            Some(tz) => RequestContext::new(user_id, &tz)
                .unwrap_or_else(|_| RequestContext::with_default_timezone(user_id)),
            None => RequestContext::with_default_timezone(user_id),
        };
        Ok(ctx)
    }

    /// Today's calendar date on the user's wall clock.
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.timezone).date_naive()
    }
}
