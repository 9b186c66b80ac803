use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (accepts a couple of aliases)
    pub fn from_input(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "todo" | "open" => Some(TaskStatus::Todo),
            "in_progress" | "in-progress" | "doing" => Some(TaskStatus::InProgress),
            "done" | "closed" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub user_id: String,
    pub client_id: Option<i64>,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub created_at: String, // ISO 8601 timestamp
}

impl Task {
    pub fn new(user_id: &str, title: &str) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            client_id: None,
            title: title.to_string(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: None,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Past due and still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => self.status.is_open() && due < today,
            None => false,
        }
    }

    pub fn due_str(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
