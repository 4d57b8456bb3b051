//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod category;
pub mod completions;
pub mod context;
pub mod dashboard;
pub mod head;
pub mod signin;
pub mod signout;
pub mod status;
pub mod subcategory;
pub mod transaction;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;
pub use transaction::KindFilter;

/// finop - companion CLI for the personal finance dashboard
#[derive(Parser, Debug)]
#[command(name = "finop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "FINOP_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "FINOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the backend API host
    #[arg(long, global = true, env = "FINOP_API_HOST", hide_env = true, hide = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FINOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the finance backend and store the session token
    Signin,

    /// End the current session
    Signout,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Show the dashboard summary (totals, split, breakdowns)
    Dashboard,

    /// Manage expense heads
    #[command(subcommand)]
    Head(HeadCommands),

    /// Manage categories under a head
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Manage subcategories under a category
    #[command(subcommand)]
    Subcategory(SubcategoryCommands),

    /// View and record transactions
    #[command(subcommand, visible_alias = "transaction")]
    Tx(TxCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Head management subcommands
#[derive(Subcommand, Debug)]
pub enum HeadCommands {
    /// List expense heads
    List,

    /// Create a new expense head
    Add {
        /// Head name
        name: String,
    },
}

/// Category management subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories under a head
    List {
        /// Head uuid or name
        #[arg(long)]
        head: String,
    },

    /// Create a category under a head
    Add {
        /// Category name
        name: String,

        /// Head uuid or name
        #[arg(long)]
        head: String,
    },
}

/// Subcategory management subcommands
#[derive(Subcommand, Debug)]
pub enum SubcategoryCommands {
    /// List subcategories under a category
    List {
        /// Category uuid or name
        #[arg(long)]
        category: String,

        /// Head uuid or name, narrows the category lookup
        #[arg(long)]
        head: Option<String>,
    },

    /// Create a subcategory under a category
    Add {
        /// Subcategory name
        name: String,

        /// Category uuid or name
        #[arg(long)]
        category: String,

        /// Head uuid or name, narrows the category lookup
        #[arg(long)]
        head: Option<String>,
    },
}

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// List transactions
    List {
        /// Filter by kind (income, expense)
        #[arg(long)]
        kind: Option<KindFilter>,

        /// Filter expenses by head name
        #[arg(long)]
        head: Option<String>,
    },

    /// Record an income transaction
    #[command(after_help = "EXAMPLES:\n  \
            finop tx add-income --amount 2500 --source salary\n  \
            finop tx add-income --amount 75.50 --source refund --description \"insurance refund\"")]
    AddIncome {
        /// Amount received
        #[arg(long)]
        amount: f64,

        /// Where the income came from
        #[arg(long)]
        source: String,

        /// Free-form note
        #[arg(long)]
        description: Option<String>,
    },

    /// Record an expense transaction
    #[command(after_help = "EXAMPLES:\n  \
            finop tx add-expense --amount 54.20 --head Household --category Food \\\n      \
            --subcategory Groceries --title \"Weekly shop\"")]
    AddExpense {
        /// Amount spent
        #[arg(long)]
        amount: f64,

        /// Head uuid or name
        #[arg(long)]
        head: String,

        /// Category uuid or name (under the head)
        #[arg(long)]
        category: String,

        /// Subcategory uuid or name (under the category)
        #[arg(long)]
        subcategory: String,

        /// Short title for the expense
        #[arg(long)]
        title: String,

        /// Free-form note
        #[arg(long)]
        description: Option<String>,
    },

    /// Update an existing transaction
    Update {
        /// Transaction uuid
        uuid: String,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,

        /// New title (expenses)
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },
}
