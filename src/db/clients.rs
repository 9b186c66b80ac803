use crate::errors::AppResult;
use crate::models::client::{Client, UNKNOWN_CLIENT};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

pub fn map_row(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        company: row.get("company")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        notes: row.get("notes")?,
        archived: row.get::<_, i64>("archived")? != 0,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new client and return its row id.
pub fn insert_client(conn: &Connection, c: &Client) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO clients (user_id, name, company, email, phone, notes, archived, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.user_id,
            c.name,
            c.company,
            c.email,
            c.phone,
            c.notes,
            c.archived as i64,
            c.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all editable fields.
pub fn update_client(conn: &Connection, c: &Client) -> AppResult<()> {
    conn.execute(
        "UPDATE clients
         SET name = ?1, company = ?2, email = ?3, phone = ?4, notes = ?5
         WHERE id = ?6 AND user_id = ?7",
        params![c.name, c.company, c.email, c.phone, c.notes, c.id, c.user_id],
    )?;
    Ok(())
}

pub fn set_archived(conn: &Connection, user_id: &str, id: i64, archived: bool) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE clients SET archived = ?1 WHERE id = ?2 AND user_id = ?3",
        params![archived as i64, id, user_id],
    )?;
    Ok(n)
}

/// Hard delete. Referencing tasks/time entries/invoices are left in place
/// and render as "Unknown Client" afterwards.
pub fn delete_client(conn: &Connection, user_id: &str, id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM clients WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(n)
}

pub fn get_client(conn: &Connection, user_id: &str, id: i64) -> AppResult<Option<Client>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM clients WHERE id = ?1 AND user_id = ?2")?;
    let client = stmt.query_row(params![id, user_id], map_row).optional()?;
    Ok(client)
}

/// Load the user's clients ordered by name. Archived clients are skipped
/// unless requested.
pub fn load_clients(
    conn: &Connection,
    user_id: &str,
    include_archived: bool,
) -> AppResult<Vec<Client>> {
    let sql = if include_archived {
        "SELECT * FROM clients WHERE user_id = ?1 ORDER BY name COLLATE NOCASE ASC"
    } else {
        "SELECT * FROM clients WHERE user_id = ?1 AND archived = 0
         ORDER BY name COLLATE NOCASE ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([user_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// id → display name map for joins done in memory.
pub fn client_names(conn: &Connection, user_id: &str) -> AppResult<HashMap<i64, String>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name FROM clients WHERE user_id = ?1")?;
    let rows = stmt.query_map([user_id], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut map = HashMap::new();
    for r in rows {
        let (id, name) = r?;
        map.insert(id, name);
    }
    Ok(map)
}

/// Resolve an optional client reference for display. Dangling ids fall
/// back to "Unknown Client".
pub fn resolve_name(names: &HashMap<i64, String>, client_id: Option<i64>) -> String {
    match client_id {
        None => String::new(),
        Some(id) => names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
    }
}
