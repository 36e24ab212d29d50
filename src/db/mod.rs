pub mod migrations;
pub mod queries;

use std::fs;
use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

/// File name of the vector store inside its directory.
pub const STORE_FILE: &str = "vectors.sqlite3";

pub fn open_store(dir: &Path) -> anyhow::Result<Connection> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create vector store directory {}", dir.display()))?;

    let conn = Connection::open(dir.join(STORE_FILE)).context("failed to open vector store")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
        .context("failed to set vector store pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

pub fn open_in_memory() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory vector store")?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}
