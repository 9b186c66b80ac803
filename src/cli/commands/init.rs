use crate::config::Config;
use crate::db::log;
use crate::errors::AppResult;

use crate::cli::parser::Cli;
use crate::db::initialize::init_db;
use crate::ui::messages::warning;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database (prod or test mode)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    let path = Config::config_file();
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = &cli.user {
        cfg.user = user.clone();
    }

    println!("⚙️  Initializing ClientDesk…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &cfg.database);

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    println!("✅ Database initialized at {}", &cfg.database);

    // Activity log write is non-blocking
    if let Err(e) = log::log_activity(
        &conn,
        &cfg.user,
        "init",
        "database",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write activity log: {e}"));
    }

    println!("🎉 ClientDesk initialization completed!");
    Ok(())
}
