use serde::Serialize;

/// Local profile of the active user. The avatar is a path inside the
/// config directory where the original image has been copied.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: String::new(),
            email: String::new(),
            avatar: None,
        }
    }
}
