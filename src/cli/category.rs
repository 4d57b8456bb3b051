//! Category command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Category, FinanceApi, resolve_head};
use crate::error::Result;
use crate::output::{json, table};

/// Category for table display
#[derive(Tabled)]
struct CategoryDisplay {
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<Category> for CategoryDisplay {
    fn from(category: Category) -> Self {
        Self {
            uuid: category.uuid,
            name: category.name,
        }
    }
}

/// Run the category list command
pub async fn list(ctx: &CommandContext, head: &str) -> Result<()> {
    let head = resolve_head(ctx.client.as_ref(), head).await?;
    let categories = ctx.client.list_categories(&head.uuid).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("Categories under {}", head.name.bold());
            let rows: Vec<CategoryDisplay> =
                categories.into_iter().map(CategoryDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&categories)?);
        }
    }

    Ok(())
}

/// Run the category add command
pub async fn add(ctx: &CommandContext, head: &str, name: &str) -> Result<()> {
    let head = resolve_head(ctx.client.as_ref(), head).await?;
    let created = ctx.client.create_category(&head.uuid, name).await?;

    println!(
        "{} Created category {} under {} ({})",
        "✓".green(),
        name.bold(),
        head.name.bold(),
        created.uuid
    );

    Ok(())
}
