// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::context::RequestContext;
use crate::dates::decode_instant;
use crate::store;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, ctx: &RequestContext) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions referencing a category that no longer exists
    let mut stmt = conn.prepare(
        "SELECT t.id FROM transactions t
         LEFT JOIN transaction_categories c ON t.category_id=c.id
         WHERE t.user_id=?1 AND t.category_id IS NOT NULL AND c.id IS NULL",
    )?;
    let mut cur = stmt.query([ctx.user_id])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["orphaned_category".into(), format!("transactions#{}", id)]);
    }

    // 2) Stored instants that don't parse in the canonical format
    for (label, raw) in store::raw_date_fields(conn, ctx)? {
        if decode_instant(&raw).is_err() {
            rows.push(vec!["malformed_instant".into(), format!("{} '{}'", label, raw)]);
        }
    }

    // 3) Snapshot identity: net worth must equal assets - liabilities
    for snap in store::list_snapshots(conn, ctx)? {
        if snap.net_worth != snap.total_assets - snap.total_liabilities
            || snap.net_worth != snap.equity
        {
            rows.push(vec!["snapshot_identity".into(), snap.date.to_string()]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
