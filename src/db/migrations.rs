use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;

/// Schema scripts in order; entry `n` upgrades version `n` to `n + 1`.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

const CURRENT_SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

fn user_version(conn: &Connection) -> Result<i32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")
}

/// Bring the schema up to date inside a single transaction.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let found = user_version(conn)?;
    if found > CURRENT_SCHEMA_VERSION {
        bail!("database schema v{found} is newer than this build supports (v{CURRENT_SCHEMA_VERSION})");
    }

    let pending = MIGRATIONS.iter().enumerate().skip(found.max(0) as usize);
    if pending.len() == 0 {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;
    for (index, script) in pending {
        let target = index + 1;
        tx.execute_batch(script)
            .with_context(|| format!("schema migration v{target} failed"))?;
        info!("Applied schema migration v{target}");
    }
    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")
}
