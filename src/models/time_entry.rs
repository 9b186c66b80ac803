use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: String,
    pub client_id: Option<i64>,
    pub task_id: Option<i64>,
    pub date: NaiveDate,
    pub minutes: i64,
    pub billable: bool,
    pub billed: bool, // set once the entry has been pulled onto an invoice
    pub note: String,
    pub created_at: String, // ISO 8601 timestamp
}

impl TimeEntry {
    pub fn new(user_id: &str, date: NaiveDate, minutes: i64) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            client_id: None,
            task_id: None,
            date,
            minutes,
            billable: true,
            billed: false,
            note: String::new(),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
