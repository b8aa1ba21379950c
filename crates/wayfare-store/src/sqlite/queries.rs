use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use wayfare_types::{Document, DocumentId, Fields, Filter};

use crate::{Error, Result, Snapshot};

pub fn insert(conn: &Connection, collection: &str, doc: &Document) -> Result<()> {
    let fields = serde_json::to_string(&doc.fields)?;
    conn.execute(
        r#"
        INSERT INTO documents (id, collection, created_at, fields)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            doc.id.as_str(),
            collection,
            doc.created_at.to_rfc3339(),
            fields
        ],
    )?;
    Ok(())
}

/// Returns the number of rows removed (0 or 1).
pub fn delete(conn: &Connection, collection: &str, id: &DocumentId) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
        params![collection, id.as_str()],
    )?;
    Ok(removed)
}

pub fn select(conn: &Connection, collection: &str, filter: &Filter) -> Result<Snapshot> {
    let path = json_path(&filter.field)?;
    let mut stmt = conn.prepare_cached(
        r#"
        SELECT id, created_at, fields
        FROM documents
        WHERE collection = ?1 AND json_extract(fields, ?2) = ?3
        ORDER BY seq ASC
        "#,
    )?;

    let rows = stmt
        .query_map(params![collection, path, &filter.value], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    rows.into_iter()
        .map(|(id, created_at, fields)| {
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| {
                    Error::InvalidInput(format!("document {} has bad created_at: {}", id, e))
                })?
                .with_timezone(&Utc);
            let fields: Fields = serde_json::from_str(&fields)?;
            Ok(Document {
                id: DocumentId::from(id),
                created_at,
                fields,
            })
        })
        .collect()
}

/// JSON path for a top-level field. Only plain identifiers are accepted.
fn json_path(field: &str) -> Result<String> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::InvalidInput(format!(
            "unsupported filter field '{}'",
            field
        )));
    }
    Ok(format!("$.{}", field))
}
