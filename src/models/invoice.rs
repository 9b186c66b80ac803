use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
}

impl InvoiceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(InvoiceStatus::Draft),
            "sent" => Some(InvoiceStatus::Sent),
            "paid" => Some(InvoiceStatus::Paid),
            _ => None,
        }
    }

    pub fn from_input(s: &str) -> Option<Self> {
        Self::from_db_str(&s.to_lowercase())
    }

    /// The only legal transitions are draft → sent → paid.
    pub fn can_transition(&self, to: InvoiceStatus) -> bool {
        matches!(
            (self, to),
            (InvoiceStatus::Draft, InvoiceStatus::Sent)
                | (InvoiceStatus::Sent, InvoiceStatus::Paid)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub user_id: String,
    pub client_id: i64,
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: String, // ISO 8601 timestamp
}

impl Invoice {
    /// Overdue is derived at display time, never stored.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == InvoiceStatus::Sent && self.due_date < today
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub id: i64,
    pub invoice_id: i64,
    pub position: i64, // 1-based, stable for `invoice item --remove`
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Invoice totals are always derived from line items.
pub fn total(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.amount()).sum()
}
