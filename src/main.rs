// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use centavo::{cli, commands, context::RequestContext, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let ctx = RequestContext::from_settings(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("profile", sub)) => commands::profile::handle(&conn, &ctx, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, &ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &ctx, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&conn, &ctx, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&conn, &ctx, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&conn, &ctx, sub)?,
        Some(("report", sub)) => commands::report::handle(&conn, &ctx, sub)?,
        Some(("snapshot", sub)) => commands::snapshots::handle(&conn, &ctx, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &ctx)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
