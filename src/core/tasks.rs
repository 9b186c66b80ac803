use crate::config::Config;
use crate::db::log::log_activity;
use crate::db::pool::DbPool;
use crate::db::tasks;
use crate::errors::{AppError, AppResult};
use crate::models::task::{Priority, Task, TaskStatus};
use crate::ui::messages::warning;
use crate::utils::date;

pub struct TaskLogic;

impl TaskLogic {
    pub fn add(
        pool: &mut DbPool,
        cfg: &Config,
        title: &str,
        client_id: Option<i64>,
        due: Option<&str>,
        priority: Option<&str>,
    ) -> AppResult<Task> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("task title must not be empty".into()));
        }

        let mut task = Task::new(&cfg.user, title.trim());
        task.client_id = client_id;

        if let Some(d) = due {
            task.due_date =
                Some(date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?);
        }
        if let Some(p) = priority {
            task.priority = Priority::from_db_str(&p.to_lowercase())
                .ok_or_else(|| AppError::InvalidPriority(p.to_string()))?;
        }

        task.id = tasks::insert_task(&pool.conn, &task)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "add",
            &format!("task #{}", task.id),
            &format!("Created task '{}'", task.title),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(task)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn edit(
        pool: &mut DbPool,
        cfg: &Config,
        id: i64,
        title: Option<&str>,
        client_id: Option<i64>,
        due: Option<&str>,
        priority: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<Task> {
        let mut task =
            tasks::get_task(&pool.conn, &cfg.user, id)?.ok_or(AppError::NotFound("task", id))?;

        if let Some(t) = title {
            if t.trim().is_empty() {
                return Err(AppError::Validation("task title must not be empty".into()));
            }
            task.title = t.trim().to_string();
        }
        if client_id.is_some() {
            task.client_id = client_id;
        }
        if let Some(d) = due {
            task.due_date =
                Some(date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?);
        }
        if let Some(p) = priority {
            task.priority = Priority::from_db_str(&p.to_lowercase())
                .ok_or_else(|| AppError::InvalidPriority(p.to_string()))?;
        }
        if let Some(s) = status {
            task.status =
                TaskStatus::from_input(s).ok_or_else(|| AppError::InvalidStatus(s.to_string()))?;
        }

        tasks::update_task(&pool.conn, &task)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "edit",
            &format!("task #{id}"),
            &format!("Updated task '{}'", task.title),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(task)
    }

    pub fn complete(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<()> {
        let n = tasks::set_status(&pool.conn, &cfg.user, id, TaskStatus::Done)?;
        if n == 0 {
            return Err(AppError::NotFound("task", id));
        }

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "done",
            &format!("task #{id}"),
            &format!("Task #{id} marked done"),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    pub fn delete(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<()> {
        let n = tasks::delete_task(&pool.conn, &cfg.user, id)?;
        if n == 0 {
            return Err(AppError::NotFound("task", id));
        }

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "del",
            &format!("task #{id}"),
            &format!("Deleted task #{id}"),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }
}
