//! Signout command implementation

use colored::Colorize;

use crate::cli::{GlobalOptions, context};
use crate::error::Result;
use crate::session;

/// Run the signout command. Safe to repeat: evicting an absent token is a
/// no-op.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let store = context::token_store(opts)?;
    session::logout(&store, &context::SignInHint)?;

    println!("{} Signed out.", "✓".green());
    Ok(())
}
