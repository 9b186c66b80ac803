use crate::cli::parser::{Commands, TimeAction};
use crate::config::Config;
use crate::core::time::TimeLogic;
use crate::db::clients::{client_names, resolve_name};
use crate::db::pool::DbPool;
use crate::db::time_entries::{TimeFilter, load_entries};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::colors::{GREY, RESET};
use crate::utils::date;
use crate::utils::formatting::{format_minutes, truncate};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Time { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        TimeAction::Log {
            duration,
            task,
            client,
            date: entry_date,
            note,
            not_billable,
        } => {
            let entry = TimeLogic::log(
                &mut pool,
                cfg,
                duration,
                *task,
                *client,
                entry_date.as_deref(),
                note.as_deref(),
                !*not_billable,
            )?;
            success(format!(
                "Logged {} on {} (entry #{}).",
                format_minutes(entry.minutes),
                entry.date_str(),
                entry.id
            ));
        }

        TimeAction::List {
            period,
            client,
            task,
        } => {
            let filter = TimeFilter {
                client_id: *client,
                task_id: *task,
                bounds: match period.as_deref() {
                    None => None,
                    Some(p) => Some(
                        date::range_bounds(p)
                            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?,
                    ),
                },
            };

            let entries = load_entries(&pool.conn, &cfg.user, &filter)?;
            if entries.is_empty() {
                println!("No time entries found.");
                return Ok(());
            }

            let names = client_names(&pool.conn, &cfg.user)?;

            let mut table = Table::new(&["ID", "DATE", "CLIENT", "TASK", "TIME", "FLAGS", "NOTE"]);
            let mut total = 0i64;
            let mut billable = 0i64;

            for e in &entries {
                total += e.minutes;
                if e.billable {
                    billable += e.minutes;
                }

                let mut flags = Vec::new();
                if !e.billable {
                    flags.push("non-billable");
                }
                if e.billed {
                    flags.push("billed");
                }

                table.add_row(vec![
                    e.id.to_string(),
                    e.date_str(),
                    resolve_name(&names, e.client_id),
                    e.task_id.map(|t| format!("#{t}")).unwrap_or_default(),
                    format_minutes(e.minutes),
                    format!("{GREY}{}{RESET}", flags.join(",")),
                    truncate(&e.note, 32),
                ]);
            }

            print!("{}", table.render());
            println!(
                "\nTotal: {} ({} billable) across {} entries.",
                format_minutes(total),
                format_minutes(billable),
                entries.len()
            );
        }

        TimeAction::Del { id } => {
            TimeLogic::delete(&mut pool, cfg, *id)?;
            success(format!("Time entry #{id} deleted."));
        }
    }

    Ok(())
}
