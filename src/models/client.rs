use serde::Serialize;

/// Display text used wherever a record points at a client that no
/// longer exists. References are not enforced on delete.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    pub archived: bool,
    pub created_at: String, // ISO 8601 timestamp
}

impl Client {
    pub fn new(user_id: &str, name: &str) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            name: name.to_string(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
            notes: String::new(),
            archived: false,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Name plus company when present: "Acme (Acme Corp SpA)".
    pub fn label(&self) -> String {
        if self.company.is_empty() || self.company == self.name {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.company)
        }
    }
}
