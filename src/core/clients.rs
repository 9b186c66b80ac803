use crate::config::Config;
use crate::db::log::log_activity;
use crate::db::pool::DbPool;
use crate::db::{clients, invoices, tasks, time_entries};
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::models::invoice::{self, InvoiceStatus};
use crate::models::task::TaskStatus;
use crate::ui::messages::warning;

pub struct ClientLogic;

/// Derived figures shown by `client show`.
#[derive(Debug, Default)]
pub struct ClientFigures {
    pub open_tasks: i64,
    pub logged_minutes: i64,
    pub outstanding: f64,
}

/// Loose shape check only; anything the mail provider would accept
/// passes.
fn plausible_email(s: &str) -> bool {
    let re = regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern");
    re.is_match(s)
}

impl ClientLogic {
    pub fn create(
        pool: &mut DbPool,
        cfg: &Config,
        name: &str,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Client> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("client name must not be empty".into()));
        }
        if let Some(e) = email
            && !e.is_empty()
            && !plausible_email(e)
        {
            return Err(AppError::Validation(format!("implausible email: {e}")));
        }

        let mut client = Client::new(&cfg.user, name.trim());
        client.company = company.unwrap_or_default().to_string();
        client.email = email.unwrap_or_default().to_string();
        client.phone = phone.unwrap_or_default().to_string();
        client.notes = notes.unwrap_or_default().to_string();

        client.id = clients::insert_client(&pool.conn, &client)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "add",
            &format!("client #{}", client.id),
            &format!("Created client '{}'", client.name),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(client)
    }

    pub fn edit(
        pool: &mut DbPool,
        cfg: &Config,
        id: i64,
        name: Option<&str>,
        company: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Client> {
        let mut client = clients::get_client(&pool.conn, &cfg.user, id)?
            .ok_or(AppError::NotFound("client", id))?;

        if let Some(n) = name {
            if n.trim().is_empty() {
                return Err(AppError::Validation("client name must not be empty".into()));
            }
            client.name = n.trim().to_string();
        }
        if let Some(c) = company {
            client.company = c.to_string();
        }
        if let Some(e) = email {
            if !e.is_empty() && !plausible_email(e) {
                return Err(AppError::Validation(format!("implausible email: {e}")));
            }
            client.email = e.to_string();
        }
        if let Some(p) = phone {
            client.phone = p.to_string();
        }
        if let Some(n) = notes {
            client.notes = n.to_string();
        }

        clients::update_client(&pool.conn, &client)?;

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "edit",
            &format!("client #{id}"),
            &format!("Updated client '{}'", client.name),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }

        Ok(client)
    }

    pub fn archive(pool: &mut DbPool, cfg: &Config, id: i64, archived: bool) -> AppResult<()> {
        let n = clients::set_archived(&pool.conn, &cfg.user, id, archived)?;
        if n == 0 {
            return Err(AppError::NotFound("client", id));
        }

        let op = if archived { "archive" } else { "unarchive" };
        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            op,
            &format!("client #{id}"),
            &format!("Client #{id} {op}d"),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    /// Hard delete. Records referencing the client stay behind and render
    /// as "Unknown Client" from here on.
    pub fn delete(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<()> {
        let n = clients::delete_client(&pool.conn, &cfg.user, id)?;
        if n == 0 {
            return Err(AppError::NotFound("client", id));
        }

        if let Err(e) = log_activity(
            &pool.conn,
            &cfg.user,
            "del",
            &format!("client #{id}"),
            &format!("Deleted client #{id}"),
        ) {
            warning(format!("Failed to write activity log: {e}"));
        }
        Ok(())
    }

    /// Fold the client's tasks, time and invoices into display figures.
    pub fn figures(pool: &mut DbPool, cfg: &Config, id: i64) -> AppResult<ClientFigures> {
        let conn = &pool.conn;

        let task_filter = tasks::TaskFilter {
            client_id: Some(id),
            ..Default::default()
        };
        let open_tasks = tasks::load_tasks(conn, &cfg.user, &task_filter)?
            .iter()
            .filter(|t| t.status != TaskStatus::Done)
            .count() as i64;

        let time_filter = time_entries::TimeFilter {
            client_id: Some(id),
            ..Default::default()
        };
        let logged_minutes = time_entries::load_entries(conn, &cfg.user, &time_filter)?
            .iter()
            .map(|e| e.minutes)
            .sum();

        let invoice_filter = invoices::InvoiceFilter {
            client_id: Some(id),
            status: Some(InvoiceStatus::Sent),
            ..Default::default()
        };
        let mut outstanding = 0.0;
        for inv in invoices::load_invoices(conn, &cfg.user, &invoice_filter)? {
            outstanding += invoice::total(&invoices::load_items(conn, inv.id)?);
        }

        Ok(ClientFigures {
            open_tasks,
            logged_minutes,
            outstanding,
        })
    }
}
