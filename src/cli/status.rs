//! Status command implementation

use colored::Colorize;

use crate::cli::{GlobalOptions, context};
use crate::config::Config;
use crate::error::Result;
use crate::session::{self, TokenStore};
use crate::session::claims;

/// Run the status command to display configuration and session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "finop Status".bold());

    let config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(_) => {
            println!("Config file: {}", "none (using defaults)".dimmed());
            Config::default()
        }
    };

    println!(
        "API host: {}",
        config.resolve_api_host(opts.api_host_ref()).cyan()
    );
    println!();

    let store = context::token_store(opts)?;
    match store.get()? {
        None => {
            println!("{} Not signed in", "✗".red());
            println!("  → Run 'finop signin' to start a session");
        }
        Some(token) => match claims::decode(&token).and_then(|c| c.expires_at()) {
            Err(_) => {
                println!("{} Stored session token is unreadable", "⚠".yellow());
                println!("  → Run 'finop signin' to replace it");
            }
            Ok(expires_at) => {
                if session::is_expired(Some(&token)) {
                    println!("{} Session expired", "⚠".yellow());
                    println!("  → Run 'finop signin' to start a new session");
                } else {
                    let remaining = expires_at.signed_duration_since(chrono::Utc::now());
                    let hours = remaining.num_hours();
                    let mins = remaining.num_minutes() % 60;

                    println!(
                        "{} Session valid (expires in {}h {}m)",
                        "✓".green(),
                        hours,
                        mins
                    );
                }
            }
        },
    }

    println!();
    Ok(())
}
