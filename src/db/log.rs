use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// One row of the `activity_log` table.
#[derive(Debug, Clone)]
pub struct ActivityRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Append an activity line. Called by every mutating command; callers
/// report a failure but never abort the operation because of it.
pub fn log_activity(
    conn: &Connection,
    user_id: &str,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO activity_log (user_id, date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    stmt.execute(params![user_id, now, operation, target, message])?;

    Ok(())
}

/// Load activity lines, newest first. Migration markers (written with an
/// empty user_id) are visible to every user.
pub fn load_activity(
    conn: &Connection,
    user_id: &str,
    limit: Option<usize>,
) -> AppResult<Vec<ActivityRow>> {
    let sql = match limit {
        Some(n) => format!(
            "SELECT id, date, operation, target, message FROM activity_log
             WHERE user_id = ?1 OR user_id = ''
             ORDER BY id DESC LIMIT {n}"
        ),
        None => "SELECT id, date, operation, target, message FROM activity_log
                 WHERE user_id = ?1 OR user_id = ''
                 ORDER BY id DESC"
            .to_string(),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([user_id], |row| {
        Ok(ActivityRow {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
