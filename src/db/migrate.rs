use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `activity_log` table exists. Everything else depends on
/// it: applied migrations are marked here, and every mutating command
/// appends to it.
fn ensure_activity_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS activity_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id   TEXT NOT NULL DEFAULT '',
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check the activity log for a previously applied migration.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM activity_log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO activity_log (user_id, date, operation, target, message)
         VALUES ('', datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create all record collections with the current schema.
fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            name        TEXT NOT NULL,
            company     TEXT NOT NULL DEFAULT '',
            email       TEXT NOT NULL DEFAULT '',
            phone       TEXT NOT NULL DEFAULT '',
            notes       TEXT NOT NULL DEFAULT '',
            archived    INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            client_id   INTEGER,
            title       TEXT NOT NULL,
            status      TEXT NOT NULL DEFAULT 'todo'
                        CHECK (status IN ('todo','in_progress','done')),
            priority    TEXT NOT NULL DEFAULT 'medium'
                        CHECK (priority IN ('low','medium','high')),
            due_date    TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            client_id   INTEGER,
            task_id     INTEGER,
            date        TEXT NOT NULL,          -- YYYY-MM-DD
            minutes     INTEGER NOT NULL,
            billable    INTEGER NOT NULL DEFAULT 1,
            billed      INTEGER NOT NULL DEFAULT 0,
            note        TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS invoices (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            client_id   INTEGER NOT NULL,
            number      TEXT NOT NULL UNIQUE,
            issue_date  TEXT NOT NULL,          -- YYYY-MM-DD
            due_date    TEXT NOT NULL,          -- YYYY-MM-DD
            status      TEXT NOT NULL DEFAULT 'draft'
                        CHECK (status IN ('draft','sent','paid')),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS invoice_items (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            invoice_id  INTEGER NOT NULL,
            position    INTEGER NOT NULL,
            description TEXT NOT NULL,
            quantity    REAL NOT NULL,
            unit_price  REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id      TEXT PRIMARY KEY,
            name    TEXT NOT NULL DEFAULT '',
            email   TEXT NOT NULL DEFAULT '',
            avatar  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_clients_user       ON clients(user_id, archived);
        CREATE INDEX IF NOT EXISTS idx_tasks_user_status  ON tasks(user_id, status);
        CREATE INDEX IF NOT EXISTS idx_time_user_date     ON time_entries(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_invoices_user      ON invoices(user_id, status);
        CREATE INDEX IF NOT EXISTS idx_items_invoice      ON invoice_items(invoice_id);
        "#,
    )?;
    Ok(())
}

/// Pre-0.3 databases have no `archived` flag on clients.
fn migrate_add_client_archived(conn: &Connection) -> Result<()> {
    let version = "20250412_0003_add_client_archived";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if table_exists(conn, "clients")? && !column_exists(conn, "clients", "archived")? {
        conn.execute(
            "ALTER TABLE clients ADD COLUMN archived INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
        success("Migration applied: added 'archived' flag to clients.");
    }

    mark_applied(conn, version, "Added archived flag to clients")?;
    Ok(())
}

/// Pre-0.4 databases track billable time but not whether an entry has
/// already been pulled onto an invoice.
fn migrate_add_time_billed(conn: &Connection) -> Result<()> {
    let version = "20250528_0004_add_time_billed";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if table_exists(conn, "time_entries")? && !column_exists(conn, "time_entries", "billed")? {
        conn.execute(
            "ALTER TABLE time_entries ADD COLUMN billed INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
        success("Migration applied: added 'billed' flag to time entries.");
    }

    mark_applied(conn, version, "Added billed flag to time entries")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db() and by `db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_activity_table(conn)?;
    create_base_schema(conn)?;

    migrate_add_client_archived(conn)?;
    migrate_add_time_billed(conn)?;

    Ok(())
}
