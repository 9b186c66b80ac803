//! Configuration file migrations.
//! Older config files may miss keys that were added later; `check` reports
//! them and `apply` rewrites the file with defaults filled in.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::fs;
use std::path::Path;

/// Every key a current config file must contain.
const REQUIRED_KEYS: &[&str] = &[
    "database",
    "user",
    "currency",
    "hourly_rate",
    "invoice_prefix",
    "invoice_due_days",
];

/// Return the list of keys missing from the config file on disk.
pub fn check(path: &Path) -> AppResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let mapping = match value.as_mapping() {
        Some(m) => m,
        None => return Err(AppError::Config("config file is not a YAML mapping".into())),
    };

    let mut missing = Vec::new();
    for key in REQUIRED_KEYS {
        if !mapping.keys().any(|k| k.as_str() == Some(key)) {
            missing.push((*key).to_string());
        }
    }

    Ok(missing)
}

/// Fill missing keys with defaults and rewrite the file.
/// Returns true when the file was changed.
pub fn apply(path: &Path) -> AppResult<bool> {
    let missing = check(path)?;
    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(false);
    }

    // Parsing through Config picks up the serde defaults; keys that exist
    // on disk keep their value.
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let cfg: Config =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    let yaml = serde_yaml::to_string(&cfg).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration migrated: added {} missing key(s): {}",
        missing.len(),
        missing.join(", ")
    ));

    Ok(true)
}
