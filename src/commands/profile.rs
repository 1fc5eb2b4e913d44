// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::{RequestContext, DEFAULT_TIMEZONE};
use crate::utils::set_setting;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("timezone", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            // Validate before persisting so a typo never poisons the
            // settings table (reads would silently fall back anyway).
            RequestContext::new(ctx.user_id, name)?;
            set_setting(conn, "timezone", name.trim())?;
            println!("Timezone set to {}", name.trim());
        }
        Some(("user", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            set_setting(conn, "active_user", &id.to_string())?;
            println!("Active user set to {}", id);
        }
        _ => {
            println!(
                "user {}  timezone {} (default {})",
                ctx.user_id, ctx.timezone, DEFAULT_TIMEZONE
            );
        }
    }
    Ok(())
}
