use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::db::log::log_activity;
use crate::db::pool::DbPool;
use crate::db::users::{get_profile, upsert_profile};
use crate::errors::{AppError, AppResult};
use crate::models::user::UserProfile;
use crate::ui::messages::{success, warning};
use crate::utils::colors::colorize_optional;
use std::fs;
use std::path::Path;

/// Copy the avatar image into the config directory and return the new
/// path, so the profile never points at a file the user may move.
fn store_avatar(user_id: &str, source: &str) -> AppResult<String> {
    let src = Path::new(source);
    if !src.is_file() {
        return Err(AppError::Validation(format!(
            "avatar file not found: {source}"
        )));
    }

    let ext = src
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());

    let dir = Config::config_dir().join("avatars");
    fs::create_dir_all(&dir)?;

    let dest = dir.join(format!("{user_id}.{ext}"));
    fs::copy(src, &dest)?;

    Ok(dest.to_string_lossy().to_string())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        UserAction::Show => {
            let profile = get_profile(&pool.conn, &cfg.user)?
                .unwrap_or_else(|| UserProfile::new(&cfg.user));

            println!("\n=== Profile '{}' ===", profile.id);
            println!("Name:   {}", colorize_optional(&profile.name));
            println!("Email:  {}", colorize_optional(&profile.email));
            println!(
                "Avatar: {}",
                colorize_optional(profile.avatar.as_deref().unwrap_or(""))
            );
        }

        UserAction::Set {
            name,
            email,
            avatar,
        } => {
            let mut profile = get_profile(&pool.conn, &cfg.user)?
                .unwrap_or_else(|| UserProfile::new(&cfg.user));

            if let Some(n) = name {
                profile.name = n.clone();
            }
            if let Some(e) = email {
                profile.email = e.clone();
            }
            if let Some(src) = avatar {
                profile.avatar = Some(store_avatar(&cfg.user, src)?);
            }

            upsert_profile(&pool.conn, &profile)?;

            if let Err(e) = log_activity(
                &pool.conn,
                &cfg.user,
                "edit",
                "profile",
                "Updated user profile",
            ) {
                warning(format!("Failed to write activity log: {e}"));
            }

            success(format!("Profile '{}' updated.", profile.id));
        }
    }

    Ok(())
}
