use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{clients, invoices, tasks, time_entries};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{
    ClientExport, Exportable, InvoiceExport, TaskExport, TimeExport,
};
use crate::export::pdf::PdfDoc;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportEntity, ExportFormat, notify_export_success};
use crate::models::invoice;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::io;
use std::path::Path;

/// Write already-flattened rows in the requested format. Shared by the
/// entity exports below and by `report --file`.
pub fn write_rows<T: Exportable>(
    format: &ExportFormat,
    path: &Path,
    title: &str,
    rows: &[T],
) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Xlsx => export_xlsx(rows, path),
        ExportFormat::Pdf => {
            let table: Vec<Vec<String>> = rows.iter().map(|r| r.row()).collect();
            let mut doc = PdfDoc::new();
            doc.table(title, T::headers(), &table);
            doc.save(path)
                .map_err(|e| AppError::Export(format!("PDF write error: {e}")))?;
            notify_export_success("PDF", path);
            Ok(())
        }
    }
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one collection as flat rows.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period / `start:end` expression;
    ///   it filters the entity's natural date (created / due / entry /
    ///   issue date).
    pub fn export(
        pool: &mut DbPool,
        cfg: &Config,
        entity: &ExportEntity,
        format: &ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<()> {
        let path = expand_tilde(file);
        let path = path.as_path();

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let title = build_title(entity, range);

        match entity {
            ExportEntity::Clients => {
                let rows = load_client_rows(pool, cfg, bounds)?;
                write_or_warn(format, path, &title, &rows)
            }
            ExportEntity::Tasks => {
                let rows = load_task_rows(pool, cfg, bounds)?;
                write_or_warn(format, path, &title, &rows)
            }
            ExportEntity::Time => {
                let rows = load_time_rows(pool, cfg, bounds)?;
                write_or_warn(format, path, &title, &rows)
            }
            ExportEntity::Invoices => {
                let rows = load_invoice_rows(pool, cfg, bounds)?;
                write_or_warn(format, path, &title, &rows)
            }
        }
    }
}

fn write_or_warn<T: Exportable>(
    format: &ExportFormat,
    path: &Path,
    title: &str,
    rows: &[T],
) -> AppResult<()> {
    if rows.is_empty() {
        warning("No records found for the selected range.");
        return Ok(());
    }
    write_rows(format, path, title, rows)
}

/// PDF/table title describing the exported slice.
fn build_title(entity: &ExportEntity, range: &Option<String>) -> String {
    let what = match entity {
        ExportEntity::Clients => "Clients",
        ExportEntity::Tasks => "Tasks",
        ExportEntity::Time => "Time entries",
        ExportEntity::Invoices => "Invoices",
    };

    match range {
        Some(r) if !r.eq_ignore_ascii_case("all") => format!("{what} for {r}"),
        _ => what.to_string(),
    }
}

fn load_client_rows(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<ClientExport>> {
    let all = clients::load_clients(&pool.conn, &cfg.user, true)?;

    // Client creation timestamps are RFC 3339; compare on the date part.
    let keep = |created: &str| match bounds {
        None => true,
        Some((start, end)) => match created
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        {
            Some(d) => d >= start && d <= end,
            None => true,
        },
    };

    Ok(all
        .iter()
        .filter(|c| keep(&c.created_at))
        .map(ClientExport::from_client)
        .collect())
}

fn load_task_rows(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TaskExport>> {
    let names = clients::client_names(&pool.conn, &cfg.user)?;
    let filter = tasks::TaskFilter {
        due_bounds: bounds,
        ..Default::default()
    };
    Ok(tasks::load_tasks(&pool.conn, &cfg.user, &filter)?
        .iter()
        .map(|t| TaskExport::from_task(t, &names))
        .collect())
}

fn load_time_rows(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeExport>> {
    let names = clients::client_names(&pool.conn, &cfg.user)?;
    let filter = time_entries::TimeFilter {
        bounds,
        ..Default::default()
    };
    Ok(time_entries::load_entries(&pool.conn, &cfg.user, &filter)?
        .iter()
        .map(|e| TimeExport::from_entry(e, &names))
        .collect())
}

fn load_invoice_rows(
    pool: &mut DbPool,
    cfg: &Config,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<InvoiceExport>> {
    let names = clients::client_names(&pool.conn, &cfg.user)?;
    let filter = invoices::InvoiceFilter {
        bounds,
        ..Default::default()
    };

    let mut rows = Vec::new();
    for inv in invoices::load_invoices(&pool.conn, &cfg.user, &filter)? {
        let total = invoice::total(&invoices::load_items(&pool.conn, inv.id)?);
        rows.push(InvoiceExport::from_invoice(&inv, total, &names));
    }
    Ok(rows)
}
