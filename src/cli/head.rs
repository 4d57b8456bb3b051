//! Head command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{FinanceApi, Head};
use crate::error::Result;
use crate::output::{json, table};

/// Head for table display
#[derive(Tabled)]
struct HeadDisplay {
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<Head> for HeadDisplay {
    fn from(head: Head) -> Self {
        Self {
            uuid: head.uuid,
            name: head.name,
        }
    }
}

/// Run the head list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let heads = ctx.client.list_heads().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<HeadDisplay> = heads.into_iter().map(HeadDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&heads)?);
        }
    }

    Ok(())
}

/// Run the head add command
pub async fn add(ctx: &CommandContext, name: &str) -> Result<()> {
    let created = ctx.client.create_head(name).await?;

    println!(
        "{} Created head {} ({})",
        "✓".green(),
        name.bold(),
        created.uuid
    );

    Ok(())
}
