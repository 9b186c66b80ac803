use crate::cli::parser::{Commands, InvoiceAction};
use crate::config::Config;
use crate::core::invoices::InvoiceLogic;
use crate::db::clients::{client_names, get_client, resolve_name};
use crate::db::invoices::{InvoiceFilter, get_invoice, load_invoices, load_items};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::render_invoice_pdf;
use crate::models::invoice::{self, InvoiceStatus};
use crate::ui::messages::success;
use crate::utils::colors::{RESET, color_for_invoice_status};
use crate::utils::date;
use crate::utils::formatting::format_money;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Invoice { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        InvoiceAction::Create {
            client,
            items,
            from_time,
            date: issue,
            due_days,
        } => {
            let inv = InvoiceLogic::create(
                &mut pool,
                cfg,
                *client,
                items,
                from_time.as_deref(),
                issue.as_deref(),
                *due_days,
            )?;
            let total = invoice::total(&load_items(&pool.conn, inv.id)?);
            success(format!(
                "Invoice {} created (id {}, total {}).",
                inv.number,
                inv.id,
                format_money(total, &cfg.currency)
            ));
        }

        InvoiceAction::List {
            status,
            client,
            period,
        } => {
            let filter = InvoiceFilter {
                status: match status.as_deref() {
                    None => None,
                    Some(s) => Some(
                        InvoiceStatus::from_input(s)
                            .ok_or_else(|| AppError::InvalidStatus(s.to_string()))?,
                    ),
                },
                client_id: *client,
                bounds: match period.as_deref() {
                    None => None,
                    Some(p) => Some(
                        date::range_bounds(p)
                            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?,
                    ),
                },
            };

            let invoices = load_invoices(&pool.conn, &cfg.user, &filter)?;
            if invoices.is_empty() {
                println!("No invoices found.");
                return Ok(());
            }

            let names = client_names(&pool.conn, &cfg.user)?;
            let today = date::today();

            let mut table = Table::new(&["ID", "NUMBER", "CLIENT", "ISSUED", "DUE", "STATUS", "TOTAL"]);
            let mut outstanding = 0.0;

            for inv in &invoices {
                let total = invoice::total(&load_items(&pool.conn, inv.id)?);
                if inv.status == InvoiceStatus::Sent {
                    outstanding += total;
                }

                let overdue = inv.is_overdue(today);
                let status_cell = format!(
                    "{}{}{}{}",
                    color_for_invoice_status(&inv.status, overdue),
                    inv.status.to_db_str(),
                    if overdue { " !" } else { "" },
                    RESET
                );

                table.add_row(vec![
                    inv.id.to_string(),
                    inv.number.clone(),
                    resolve_name(&names, Some(inv.client_id)),
                    inv.issue_date.format("%Y-%m-%d").to_string(),
                    inv.due_date.format("%Y-%m-%d").to_string(),
                    status_cell,
                    format!("{:.2}", total),
                ]);
            }

            print!("{}", table.render());
            println!(
                "\n{} invoice(s), outstanding {}.",
                invoices.len(),
                format_money(outstanding, &cfg.currency)
            );
        }

        InvoiceAction::Show { id } => {
            let inv = get_invoice(&pool.conn, &cfg.user, *id)?
                .ok_or(AppError::NotFound("invoice", *id))?;
            let items = load_items(&pool.conn, inv.id)?;
            let client = get_client(&pool.conn, &cfg.user, inv.client_id)?;

            println!("\n=== Invoice {} ===", inv.number);
            println!(
                "Client:  {}",
                client
                    .as_ref()
                    .map(|c| c.label())
                    .unwrap_or_else(|| crate::models::client::UNKNOWN_CLIENT.to_string())
            );
            println!("Issued:  {}", inv.issue_date.format("%Y-%m-%d"));
            println!("Due:     {}", inv.due_date.format("%Y-%m-%d"));
            println!("Status:  {}", inv.status.to_db_str());
            println!();

            let mut table = Table::new(&["#", "DESCRIPTION", "QTY", "UNIT", "AMOUNT"]);
            for item in &items {
                table.add_row(vec![
                    item.position.to_string(),
                    item.description.clone(),
                    format!("{:.2}", item.quantity),
                    format!("{:.2}", item.unit_price),
                    format!("{:.2}", item.amount()),
                ]);
            }
            print!("{}", table.render());
            println!(
                "\nTotal: {}",
                format_money(invoice::total(&items), &cfg.currency)
            );
        }

        InvoiceAction::Item { id, add, remove } => {
            if let Some(spec) = add {
                InvoiceLogic::add_item(&mut pool, cfg, *id, spec)?;
                success(format!("Line item added to invoice #{id}."));
            } else if let Some(position) = remove {
                InvoiceLogic::remove_item(&mut pool, cfg, *id, *position)?;
                success(format!(
                    "Line item {position} removed from invoice #{id}."
                ));
            } else {
                println!("Nothing to do: pass --add or --remove.");
            }
        }

        InvoiceAction::Send { id } => {
            let inv = InvoiceLogic::transition(&mut pool, cfg, *id, InvoiceStatus::Sent)?;
            success(format!("Invoice {} marked sent.", inv.number));
        }

        InvoiceAction::Pay { id } => {
            let inv = InvoiceLogic::transition(&mut pool, cfg, *id, InvoiceStatus::Paid)?;
            success(format!("Invoice {} marked paid.", inv.number));
        }

        InvoiceAction::Del { id, force } => {
            InvoiceLogic::delete(&mut pool, cfg, *id, *force)?;
            success(format!("Invoice #{id} deleted."));
        }

        InvoiceAction::Pdf { id, file, force } => {
            let inv = get_invoice(&pool.conn, &cfg.user, *id)?
                .ok_or(AppError::NotFound("invoice", *id))?;
            let items = load_items(&pool.conn, inv.id)?;
            let client = get_client(&pool.conn, &cfg.user, inv.client_id)?;

            let path = expand_tilde(file);
            let path = path.as_path();
            if path.exists() && !force {
                return Err(AppError::Validation(format!(
                    "file '{}' already exists; use --force to overwrite",
                    path.display()
                )));
            }

            render_invoice_pdf(&inv, client.as_ref(), &items, cfg, path)?;
            success(format!(
                "Invoice {} written to {}.",
                inv.number,
                path.display()
            ));
        }
    }

    Ok(())
}
