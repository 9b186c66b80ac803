use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::core::tasks::TaskLogic;
use crate::db::clients::{client_names, resolve_name};
use crate::db::pool::DbPool;
use crate::db::tasks::{TaskFilter, load_tasks};
use crate::errors::{AppError, AppResult};
use crate::models::task::{Priority, TaskStatus};
use crate::ui::messages::success;
use crate::utils::colors::{RED, RESET, color_for_priority, color_for_task_status};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TaskAction::Add {
            title,
            client,
            due,
            priority,
        } => {
            let task = TaskLogic::add(
                &mut pool,
                cfg,
                title,
                *client,
                due.as_deref(),
                priority.as_deref(),
            )?;
            success(format!("Task #{} '{}' created.", task.id, task.title));
        }

        TaskAction::List {
            status,
            client,
            priority,
            period,
        } => {
            let filter = TaskFilter {
                status: match status.as_deref() {
                    None => None,
                    Some(s) => Some(
                        TaskStatus::from_input(s)
                            .ok_or_else(|| AppError::InvalidStatus(s.to_string()))?,
                    ),
                },
                priority: match priority.as_deref() {
                    None => None,
                    Some(p) => Some(
                        Priority::from_db_str(&p.to_lowercase())
                            .ok_or_else(|| AppError::InvalidPriority(p.to_string()))?,
                    ),
                },
                client_id: *client,
                due_bounds: match period.as_deref() {
                    None => None,
                    Some(p) => Some(
                        date::range_bounds(p)
                            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?,
                    ),
                },
            };

            let tasks = load_tasks(&pool.conn, &cfg.user, &filter)?;
            if tasks.is_empty() {
                println!("No tasks found.");
                return Ok(());
            }

            let names = client_names(&pool.conn, &cfg.user)?;
            let today = date::today();

            let mut table = Table::new(&["ID", "TITLE", "CLIENT", "STATUS", "PRIO", "DUE"]);
            for t in &tasks {
                let status_cell = format!(
                    "{}{}{}",
                    color_for_task_status(&t.status),
                    t.status.to_db_str(),
                    RESET
                );
                let prio_cell = format!(
                    "{}{}{}",
                    color_for_priority(&t.priority),
                    t.priority.to_db_str(),
                    RESET
                );
                let due_cell = if t.is_overdue(today) {
                    format!("{RED}{} !{RESET}", t.due_str())
                } else {
                    t.due_str()
                };

                table.add_row(vec![
                    t.id.to_string(),
                    t.title.clone(),
                    resolve_name(&names, t.client_id),
                    status_cell,
                    prio_cell,
                    due_cell,
                ]);
            }
            print!("{}", table.render());
            println!("\n{} task(s).", tasks.len());
        }

        TaskAction::Edit {
            id,
            title,
            client,
            due,
            priority,
            status,
        } => {
            let task = TaskLogic::edit(
                &mut pool,
                cfg,
                *id,
                title.as_deref(),
                *client,
                due.as_deref(),
                priority.as_deref(),
                status.as_deref(),
            )?;
            success(format!("Task #{} '{}' updated.", task.id, task.title));
        }

        TaskAction::Done { id } => {
            TaskLogic::complete(&mut pool, cfg, *id)?;
            success(format!("Task #{id} marked done."));
        }

        TaskAction::Del { id } => {
            TaskLogic::delete(&mut pool, cfg, *id)?;
            success(format!("Task #{id} deleted."));
        }
    }

    Ok(())
}
