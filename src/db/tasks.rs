use crate::errors::{AppError, AppResult};
use crate::models::task::{Priority, Task, TaskStatus};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

/// Optional filters applied by `task list`. All active filters are ANDed.
#[derive(Debug, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub client_id: Option<i64>,
    pub due_bounds: Option<(NaiveDate, NaiveDate)>,
}

pub fn map_row(row: &Row) -> Result<Task> {
    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    let priority_str: String = row.get("priority")?;
    let priority = Priority::from_db_str(&priority_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPriority(priority_str.clone())),
        )
    })?;

    let due_raw: Option<String> = row.get("due_date")?;
    let due_date = match due_raw {
        None => None,
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })?),
    };

    Ok(Task {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        client_id: row.get("client_id")?,
        title: row.get("title")?,
        status,
        priority,
        due_date,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_task(conn: &Connection, t: &Task) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (user_id, client_id, title, status, priority, due_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.user_id,
            t.client_id,
            t.title,
            t.status.to_db_str(),
            t.priority.to_db_str(),
            t.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            t.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_task(conn: &Connection, t: &Task) -> AppResult<()> {
    conn.execute(
        "UPDATE tasks
         SET client_id = ?1, title = ?2, status = ?3, priority = ?4, due_date = ?5
         WHERE id = ?6 AND user_id = ?7",
        params![
            t.client_id,
            t.title,
            t.status.to_db_str(),
            t.priority.to_db_str(),
            t.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            t.id,
            t.user_id,
        ],
    )?;
    Ok(())
}

pub fn set_status(
    conn: &Connection,
    user_id: &str,
    id: i64,
    status: TaskStatus,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE tasks SET status = ?1 WHERE id = ?2 AND user_id = ?3",
        params![status.to_db_str(), id, user_id],
    )?;
    Ok(n)
}

pub fn delete_task(conn: &Connection, user_id: &str, id: i64) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(n)
}

pub fn get_task(conn: &Connection, user_id: &str, id: i64) -> AppResult<Option<Task>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM tasks WHERE id = ?1 AND user_id = ?2")?;
    let task = stmt.query_row(params![id, user_id], map_row).optional()?;
    Ok(task)
}

/// Load tasks with optional filters, due-dated tasks first.
pub fn load_tasks(conn: &Connection, user_id: &str, filter: &TaskFilter) -> AppResult<Vec<Task>> {
    let mut sql = "SELECT * FROM tasks WHERE user_id = ?".to_string();
    let mut values: Vec<Value> = vec![Value::from(user_id.to_string())];

    if let Some(status) = filter.status {
        sql.push_str(" AND status = ?");
        values.push(Value::from(status.to_db_str().to_string()));
    }
    if let Some(priority) = filter.priority {
        sql.push_str(" AND priority = ?");
        values.push(Value::from(priority.to_db_str().to_string()));
    }
    if let Some(client_id) = filter.client_id {
        sql.push_str(" AND client_id = ?");
        values.push(Value::from(client_id));
    }
    if let Some((start, end)) = filter.due_bounds {
        sql.push_str(" AND due_date >= ? AND due_date <= ?");
        values.push(Value::from(start.format("%Y-%m-%d").to_string()));
        values.push(Value::from(end.format("%Y-%m-%d").to_string()));
    }

    sql.push_str(" ORDER BY due_date IS NULL, due_date ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
