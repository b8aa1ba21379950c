use rusqlite::Connection;

use crate::{Error, Result};

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// NOTE: Document table layout
//
// Fields are kept as a JSON object per row and filtered with json_extract, the
// same shape the hosted store exposes. `seq` preserves insertion order for
// snapshots. Unlike an index, this table is the source of truth, so an unknown
// schema version is refused instead of being dropped and rebuilt.

pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != 0 && current_version != SCHEMA_VERSION {
        return Err(Error::Unavailable(format!(
            "document database has schema version {}, expected {}",
            current_version, SCHEMA_VERSION
        )));
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            collection TEXT NOT NULL,
            created_at TEXT NOT NULL,
            fields TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection, seq);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}
