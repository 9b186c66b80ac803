use crate::config::Config;
use crate::db::log::load_activity;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Color per operation kind in the printed activity log.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "create" | "log" => Colour::Green,
        "del" => Colour::Red,
        "edit" | "archive" | "unarchive" => Colour::Yellow,
        "done" | "pay" => Colour::Cyan,
        "send" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct ActivityLogic;

impl ActivityLogic {
    pub fn print_log(pool: &mut DbPool, cfg: &Config, limit: Option<usize>) -> AppResult<()> {
        let entries = load_activity(&pool.conn, &cfg.user, limit)?;

        if entries.is_empty() {
            println!("No activity recorded yet.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len() + e.target.len() + 3)
            .max()
            .unwrap_or(10)
            .min(48);

        println!("📜 Activity log:\n");

        for entry in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or(entry.date.clone());

            let op_target = if entry.target.is_empty() {
                entry.operation.clone()
            } else {
                format!("{} ({})", entry.operation, entry.target)
            };
            let padding = " ".repeat(op_w.saturating_sub(op_target.len()));

            // Color only the operation word; the target stays plain.
            let colored = {
                let color = color_for_operation(&entry.operation);
                match op_target.split_once(' ') {
                    Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                    None => color.paint(op_target.as_str()).to_string(),
                }
            };

            println!(
                "{:>id_w$}: {} | {}{} => {}",
                entry.id,
                date,
                colored,
                padding,
                entry.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
