use crate::config::Config;
use crate::db::log::log_activity;
use crate::db::pool::DbPool;
use crate::db::{tasks, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntry;
use crate::ui::messages::warning;
use crate::utils::date;
use crate::utils::time::parse_duration;
use chrono::NaiveDate;

pub struct TimeLogic;

impl TimeLogic {
    /// Record a duration. When only a task is given, the client is
    /// inherited from the task.
    pub fn log(
        pool: &mut DbPool,
        cfg: &Config,
        duration: &str,
        task_id: Option<i64>,
        client_id: Option<i64>,
        entry_date: Option<&str>,
        note: Option<&str>,
        billable: bool,
    ) -> AppResult<TimeEntry> {
        let minutes = parse_duration(duration)?;

        let when: NaiveDate = match entry_date {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?,
            None => date::today(),
        };

        let mut entry = TimeEntry::new(&cfg.user, when, minutes);
        entry.task_id = task_id;
        entry.client_id = client_id;
        entry.note = note.unwrap_or_default().to_string();
        entry.billable = billable;

        if entry.client_id.is_none()
            && let Some(tid) = task_id
        {
            let task = tasks::get_task(&pool.conn, &cfg.user, tid)?
                .ok_or(AppError::NotFound("task", tid))?;
            entry.client_id = task.client_id;
        }

        entry.id = time_entries::insert_entry(&pool.conn, &entry)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "log",
            &format!("time #{}", entry.id),
            &format!("Logged {} min on {}", entry.minutes, entry.date_str()),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(entry)
    }

    pub fn delete(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<()> {
        let n = time_entries::delete_entry(&pool.conn, &cfg.user, id)?;
        if n == 0 {
            return Err(AppError::NotFound("time entry", id));
        }

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "del",
            &format!("time #{id}"),
            &format!("Deleted time entry #{id}"),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }
}
