//! Path utilities for user-supplied file arguments.

use std::path::PathBuf;

/// Expand a leading `~` or `~/` into the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if path == "~" {
            return home;
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
