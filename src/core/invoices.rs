use crate::config::Config;
use crate::db::log::log_activity;
use crate::db::pool::DbPool;
use crate::db::{clients, invoices, tasks, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::ui::messages::warning;
use crate::utils::date;
use crate::utils::time::minutes_to_hours;
use chrono::{Datelike, Duration, NaiveDate};

pub struct InvoiceLogic;

/// Parse a `DESC:QTY:PRICE` item spec. The description may itself
/// contain colons, so qty/price are taken from the right.
pub fn parse_item_spec(spec: &str) -> AppResult<(String, f64, f64)> {
    let mut it = spec.rsplitn(3, ':');
    let price_raw = it.next();
    let qty_raw = it.next();
    let desc = it.next();

    let (desc, qty_raw, price_raw) = match (desc, qty_raw, price_raw) {
        (Some(d), Some(q), Some(p)) if !d.trim().is_empty() => (d.trim(), q.trim(), p.trim()),
        _ => return Err(AppError::InvalidLineItem(spec.to_string())),
    };

    let quantity: f64 = qty_raw
        .parse()
        .map_err(|_| AppError::InvalidLineItem(spec.to_string()))?;
    let unit_price: f64 = price_raw
        .parse()
        .map_err(|_| AppError::InvalidLineItem(spec.to_string()))?;

    if quantity <= 0.0 || unit_price < 0.0 {
        return Err(AppError::InvalidLineItem(spec.to_string()));
    }

    Ok((desc.to_string(), quantity, unit_price))
}

/// Next `<prefix>-<year>-NNN` number; the sequence restarts each year.
fn next_number(pool: &DbPool, cfg: &Config, year: i32) -> AppResult<String> {
    let seq = invoices::max_seq_for_year(&pool.conn, &cfg.user, &cfg.invoice_prefix, year)? + 1;
    Ok(format!("{}-{}-{:03}", cfg.invoice_prefix, year, seq))
}

impl InvoiceLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        pool: &mut DbPool,
        cfg: &Config,
        client_id: i64,
        item_specs: &[String],
        from_time: Option<&str>,
        issue: Option<&str>,
        due_days: Option<i64>,
    ) -> AppResult<Invoice> {
        clients::get_client(&pool.conn, &cfg.user, client_id)?
            .ok_or(AppError::NotFound("client", client_id))?;

        let issue_date: NaiveDate = match issue {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?,
            None => date::today(),
        };
        let due_date = issue_date + Duration::days(due_days.unwrap_or(cfg.invoice_due_days));

        let mut items: Vec<(String, f64, f64)> = Vec::new();
        for spec in item_specs {
            items.push(parse_item_spec(spec)?);
        }

        // Pull the client's unbilled billable time into line items.
        let mut billed_entry_ids: Vec<i64> = Vec::new();
        if let Some(period) = from_time {
            let bounds = date::range_bounds(period)
                .ok_or_else(|| AppError::InvalidDate(period.to_string()))?;
            let entries =
                time_entries::load_unbilled(&pool.conn, &cfg.user, client_id, bounds)?;

            if entries.is_empty() {
                return Err(AppError::NoBillableTime(period.to_string()));
            }

            for entry in &entries {
                let label = match entry.task_id {
                    Some(tid) => tasks::get_task(&pool.conn, &cfg.user, tid)?
                        .map(|t| t.title)
                        .unwrap_or_else(|| "Logged time".to_string()),
                    None if !entry.note.is_empty() => entry.note.clone(),
                    None => "Logged time".to_string(),
                };
                items.push((
                    format!("{} ({})", label, entry.date_str()),
                    minutes_to_hours(entry.minutes),
                    cfg.hourly_rate,
                ));
                billed_entry_ids.push(entry.id);
            }
        }

        if items.is_empty() {
            return Err(AppError::Validation(
                "invoice needs at least one line item".into(),
            ));
        }

        let invoice = Invoice {
            id: 0,
            user_id: cfg.user.clone(),
            client_id,
            number: next_number(pool, cfg, issue_date.year())?,
            issue_date,
            due_date,
            status: InvoiceStatus::Draft,
            created_at: chrono::Local::now().to_rfc3339(),
        };

        let id = invoices::insert_invoice(&pool.conn, &invoice)?;
        for (desc, qty, price) in &items {
            invoices::insert_item(&pool.conn, id, desc, *qty, *price)?;
        }
        time_entries::mark_billed(&pool.conn, &billed_entry_ids)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "create",
            &invoice.number,
            &format!("Created invoice {} for client #{client_id}", invoice.number),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(Invoice { id, ..invoice })
    }

    /// Line items can only change while the invoice is a draft.
    pub fn add_item(pool: &mut DbPool, cfg: &Config, id: i64, spec: &str) -> AppResult<()> {
        let invoice = Self::require_draft(pool, cfg, id)?;
        let (desc, qty, price) = parse_item_spec(spec)?;
        invoices::insert_item(&pool.conn, id, &desc, qty, price)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "edit",
            &invoice.number,
            &format!("Added line item to {}", invoice.number),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    pub fn remove_item(pool: &mut DbPool, cfg: &Config, id: i64, position: i64) -> AppResult<()> {
        let invoice = Self::require_draft(pool, cfg, id)?;
        let n = invoices::remove_item(&pool.conn, id, position)?;
        if n == 0 {
            return Err(AppError::Validation(format!(
                "invoice {} has no line item at position {position}",
                invoice.number
            )));
        }

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "edit",
            &invoice.number,
            &format!("Removed line item {position} from {}", invoice.number),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    /// draft → sent → paid; anything else is rejected.
    pub fn transition(
        pool: &mut DbPool,
        cfg: &Config,
        id: i64,
        to: InvoiceStatus,
    ) -> AppResult<Invoice> {
        let invoice = invoices::get_invoice(&pool.conn, &cfg.user, id)?
            .ok_or(AppError::NotFound("invoice", id))?;

        if !invoice.status.can_transition(to) {
            return Err(AppError::InvalidTransition(format!(
                "{} is {}, cannot become {}",
                invoice.number,
                invoice.status.to_db_str(),
                to.to_db_str()
            )));
        }

        invoices::set_status(&pool.conn, &cfg.user, id, to)?;

        let op = match to {
            InvoiceStatus::Sent => "send",
            InvoiceStatus::Paid => "pay",
            InvoiceStatus::Draft => "edit",
        };
        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            op,
            &invoice.number,
            &format!("Invoice {} marked {}", invoice.number, to.to_db_str()),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(Invoice {
            status: to,
            ..invoice
        })
    }

    /// Drafts delete freely; sent/paid invoices only with `force`.
    pub fn delete(pool: &mut DbPool, cfg: &Config, id: i64, force: bool) -> AppResult<()> {
        let invoice = invoices::get_invoice(&pool.conn, &cfg.user, id)?
            .ok_or(AppError::NotFound("invoice", id))?;

        if invoice.status != InvoiceStatus::Draft && !force {
            return Err(AppError::Validation(format!(
                "invoice {} is {}; use --force to delete it anyway",
                invoice.number,
                invoice.status.to_db_str()
            )));
        }

        invoices::delete_invoice(&pool.conn, &cfg.user, id)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "del",
            &invoice.number,
            &format!("Deleted invoice {}", invoice.number),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    fn require_draft(pool: &DbPool, cfg: &Config, id: i64) -> AppResult<Invoice> {
        let invoice = invoices::get_invoice(&pool.conn, &cfg.user, id)?
            .ok_or(AppError::NotFound("invoice", id))?;
        if invoice.status != InvoiceStatus::Draft {
            return Err(AppError::Validation(format!(
                "invoice {} is {}; only drafts can be edited",
                invoice.number,
                invoice.status.to_db_str()
            )));
        }
        Ok(invoice)
    }
}
