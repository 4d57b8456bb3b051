//! Signin command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::{GlobalOptions, context};
use crate::client::{FinanceApi, FinanceClient};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::session::TokenStore;
use crate::session::claims;

/// Run the signin command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let config = Config::load_or_default(opts.config_ref())?;

    println!("{}\n", "Sign in to your finance dashboard".bold());

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let client = FinanceClient::new(config.resolve_api_host(opts.api_host_ref()))?;

    println!("\n{}", "Signing in...".cyan());
    let token = client.login(email.trim(), &password).await?;

    // A token the guard cannot read would sign the user straight back out.
    let expires_at = claims::decode(&token)
        .and_then(|c| c.expires_at())
        .map_err(|_| ApiError::InvalidToken)?;

    let store = context::token_store(opts)?;
    store.set(&token)?;

    println!(
        "{} Signed in. Session valid until {}.",
        "✓".green(),
        expires_at.format("%Y-%m-%d %H:%M UTC").to_string().bold()
    );

    println!("\n{}", "Try running:".bold());
    println!("  {} - Show the dashboard summary", "finop dashboard".cyan());
    println!("  {} - List recorded transactions", "finop tx list".cyan());

    Ok(())
}
