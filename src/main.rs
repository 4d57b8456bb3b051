//! finop - CLI companion for the personal finance dashboard backend

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod session;
mod summary;

use cli::{
    CategoryCommands, Cli, CommandContext, Commands, GlobalOptions, HeadCommands,
    SubcategoryCommands, TxCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "finop=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Signin => cli::signin::run(&opts).await,
        Commands::Signout => cli::signout::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("finop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Dashboard => {
            let ctx = CommandContext::new(&opts).await?;
            cli::dashboard::run(&ctx).await
        }
        Commands::Head(head_cmd) => {
            let ctx = CommandContext::new(&opts).await?;
            match head_cmd {
                HeadCommands::List => cli::head::list(&ctx).await,
                HeadCommands::Add { name } => cli::head::add(&ctx, &name).await,
            }
        }
        Commands::Category(category_cmd) => {
            let ctx = CommandContext::new(&opts).await?;
            match category_cmd {
                CategoryCommands::List { head } => cli::category::list(&ctx, &head).await,
                CategoryCommands::Add { name, head } => {
                    cli::category::add(&ctx, &head, &name).await
                }
            }
        }
        Commands::Subcategory(subcategory_cmd) => {
            let ctx = CommandContext::new(&opts).await?;
            match subcategory_cmd {
                SubcategoryCommands::List { category, head } => {
                    cli::subcategory::list(&ctx, &category, head.as_deref()).await
                }
                SubcategoryCommands::Add {
                    name,
                    category,
                    head,
                } => cli::subcategory::add(&ctx, &category, head.as_deref(), &name).await,
            }
        }
        Commands::Tx(tx_cmd) => {
            let ctx = CommandContext::new(&opts).await?;
            match tx_cmd {
                TxCommands::List { kind, head } => {
                    cli::transaction::list(&ctx, kind, head.as_deref()).await
                }
                TxCommands::AddIncome {
                    amount,
                    source,
                    description,
                } => cli::transaction::add_income(&ctx, amount, &source, description).await,
                TxCommands::AddExpense {
                    amount,
                    head,
                    category,
                    subcategory,
                    title,
                    description,
                } => {
                    cli::transaction::add_expense(
                        &ctx,
                        amount,
                        &head,
                        &category,
                        &subcategory,
                        &title,
                        description,
                    )
                    .await
                }
                TxCommands::Update {
                    uuid,
                    amount,
                    title,
                    description,
                } => cli::transaction::update(&ctx, &uuid, amount, title, description).await,
            }
        }
    }
}
