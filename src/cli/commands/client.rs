use crate::cli::parser::{ClientAction, Commands};
use crate::config::Config;
use crate::core::clients::ClientLogic;
use crate::db::clients::load_clients;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::client::Client;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET, colorize_optional};
use crate::utils::formatting::{format_minutes, format_money};
use crate::utils::table::Table;
use std::io::{self, Write};

fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ClientAction::Add {
            name,
            company,
            email,
            phone,
            notes,
        } => {
            let client = ClientLogic::create(
                &mut pool,
                cfg,
                name,
                company.as_deref(),
                email.as_deref(),
                phone.as_deref(),
                notes.as_deref(),
            )?;
            success(format!("Client #{} '{}' created.", client.id, client.name));
        }

        ClientAction::List { archived, search } => {
            let clients = load_clients(&pool.conn, &cfg.user, *archived)?;

            // Search is a substring match applied after the fetch.
            let needle = search.as_deref().map(|s| s.to_lowercase());
            let filtered: Vec<&Client> = clients
                .iter()
                .filter(|c| match &needle {
                    None => true,
                    Some(n) => {
                        c.name.to_lowercase().contains(n)
                            || c.company.to_lowercase().contains(n)
                            || c.email.to_lowercase().contains(n)
                    }
                })
                .collect();

            if filtered.is_empty() {
                println!("No clients found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "NAME", "COMPANY", "EMAIL", "PHONE", "FLAGS"]);
            for c in &filtered {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    colorize_optional(&c.company),
                    colorize_optional(&c.email),
                    colorize_optional(&c.phone),
                    if c.archived {
                        format!("{GREY}archived{RESET}")
                    } else {
                        String::new()
                    },
                ]);
            }
            print!("{}", table.render());
            println!("\n{} client(s).", filtered.len());
        }

        ClientAction::Show { id } => {
            let client = crate::db::clients::get_client(&pool.conn, &cfg.user, *id)?
                .ok_or(AppError::NotFound("client", *id))?;
            let figures = ClientLogic::figures(&mut pool, cfg, *id)?;

            println!("\n=== {} ===", client.label());
            println!("ID:       {}", client.id);
            println!("Email:    {}", colorize_optional(&client.email));
            println!("Phone:    {}", colorize_optional(&client.phone));
            println!("Archived: {}", client.archived);
            if !client.notes.is_empty() {
                println!("Notes:");
                for line in textwrap::wrap(&client.notes, 72) {
                    println!("    {}", line);
                }
            }
            println!();
            println!("Open tasks:   {}", figures.open_tasks);
            println!("Logged time:  {}", format_minutes(figures.logged_minutes));
            println!(
                "Outstanding:  {}",
                format_money(figures.outstanding, &cfg.currency)
            );
        }

        ClientAction::Edit {
            id,
            name,
            company,
            email,
            phone,
            notes,
        } => {
            let client = ClientLogic::edit(
                &mut pool,
                cfg,
                *id,
                name.as_deref(),
                company.as_deref(),
                email.as_deref(),
                phone.as_deref(),
                notes.as_deref(),
            )?;
            success(format!("Client #{} '{}' updated.", client.id, client.name));
        }

        ClientAction::Archive { id } => {
            ClientLogic::archive(&mut pool, cfg, *id, true)?;
            success(format!("Client #{id} archived."));
        }

        ClientAction::Unarchive { id } => {
            ClientLogic::archive(&mut pool, cfg, *id, false)?;
            success(format!("Client #{id} unarchived."));
        }

        ClientAction::Del { id } => {
            if !ask_confirmation(&format!(
                "Delete client #{id}? Tasks, time and invoices keep pointing at it."
            )) {
                info("Operation cancelled.");
                return Ok(());
            }
            ClientLogic::delete(&mut pool, cfg, *id)?;
            success(format!("Client #{id} deleted."));
        }
    }

    Ok(())
}
