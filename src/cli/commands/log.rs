use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::activity::ActivityLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        ActivityLogic::print_log(&mut pool, cfg, *limit)?;
    }

    Ok(())
}
