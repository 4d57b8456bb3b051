//! Subcategory command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{
    Category, FinanceApi, Subcategory, resolve_category, resolve_category_anywhere, resolve_head,
};
use crate::error::Result;
use crate::output::{json, table};

/// Subcategory for table display
#[derive(Tabled)]
struct SubcategoryDisplay {
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<Subcategory> for SubcategoryDisplay {
    fn from(subcategory: Subcategory) -> Self {
        Self {
            uuid: subcategory.uuid,
            name: subcategory.name,
        }
    }
}

/// Find the category, optionally narrowed to a head
async fn locate_category(
    ctx: &CommandContext,
    category: &str,
    head: Option<&str>,
) -> Result<Category> {
    match head {
        Some(head) => {
            let head = resolve_head(ctx.client.as_ref(), head).await?;
            resolve_category(ctx.client.as_ref(), &head.uuid, category).await
        }
        None => resolve_category_anywhere(ctx.client.as_ref(), category).await,
    }
}

/// Run the subcategory list command
pub async fn list(ctx: &CommandContext, category: &str, head: Option<&str>) -> Result<()> {
    let category = locate_category(ctx, category, head).await?;
    let subcategories = ctx.client.list_subcategories(&category.uuid).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("Subcategories under {}", category.name.bold());
            let rows: Vec<SubcategoryDisplay> = subcategories
                .into_iter()
                .map(SubcategoryDisplay::from)
                .collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&subcategories)?);
        }
    }

    Ok(())
}

/// Run the subcategory add command
pub async fn add(
    ctx: &CommandContext,
    category: &str,
    head: Option<&str>,
    name: &str,
) -> Result<()> {
    let category = locate_category(ctx, category, head).await?;
    let created = ctx.client.create_subcategory(&category.uuid, name).await?;

    println!(
        "{} Created subcategory {} under {} ({})",
        "✓".green(),
        name.bold(),
        category.name.bold(),
        created.uuid
    );

    Ok(())
}
