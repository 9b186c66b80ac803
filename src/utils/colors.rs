/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

use crate::models::invoice::InvoiceStatus;
use crate::models::task::{Priority, TaskStatus};

pub fn color_for_task_status(status: &TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => YELLOW,
        TaskStatus::InProgress => CYAN,
        TaskStatus::Done => GREEN,
    }
}

pub fn color_for_priority(priority: &Priority) -> &'static str {
    match priority {
        Priority::Low => GREY,
        Priority::Medium => RESET,
        Priority::High => RED,
    }
}

pub fn color_for_invoice_status(status: &InvoiceStatus, overdue: bool) -> &'static str {
    if overdue {
        return RED;
    }
    match status {
        InvoiceStatus::Draft => GREY,
        InvoiceStatus::Sent => YELLOW,
        InvoiceStatus::Paid => GREEN,
    }
}

/// Grey out empty optional fields in listings.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
