pub(crate) mod fs_utils;
mod json_csv;
pub mod logic;
pub mod model;
mod pdf;
mod range;
mod xlsx;

pub use logic::ExportLogic;
pub use logic::write_rows;
pub use model::Exportable;
pub use pdf::render_invoice_pdf;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for all export writers.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportEntity {
    Clients,
    Tasks,
    Time,
    Invoices,
}

impl ExportEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportEntity::Clients => "clients",
            ExportEntity::Tasks => "tasks",
            ExportEntity::Time => "time",
            ExportEntity::Invoices => "invoices",
        }
    }
}
