use crate::domain::model::{Category, CategoryFilter, FilterState, ProductStatus, StatusFilter};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Command-line admin client for a product catalog.")]
#[command(version)]
pub struct Cli {
    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List products
    List(ListArgs),

    /// Show one product
    Get {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: Category,
    },

    /// Update a product; omitted fields keep their current value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        status: Option<ProductStatus>,
    },

    /// Delete a product
    Delete {
        id: i64,
        /// Don't ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Toggle a product between ACTIVE and INACTIVE
    Toggle { id: i64 },

    /// Page through products interactively
    Browse(FilterArgs),

    /// Generate config sample
    GenerateConfig,

    /// Show status
    Status,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Name substring filter
    #[arg(long)]
    pub name: Option<String>,

    /// Category filter (ELECTRONICS, CLOTHING, BOOKS or ALL)
    #[arg(long, default_value = "ALL")]
    pub category: CategoryFilter,

    /// Status filter (ACTIVE, INACTIVE or ALL)
    #[arg(long, default_value = "ALL")]
    pub status: StatusFilter,

    /// Page size (defaults to config)
    #[arg(long)]
    pub size: Option<u32>,
}

impl FilterArgs {
    pub fn filters(&self) -> FilterState {
        FilterState {
            name: self.name.clone(),
            category: self.category,
            status: self.status,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Zero-based page index (offset paging)
    #[arg(long, conflicts_with = "cursor")]
    pub page: Option<u32>,

    /// Cursor token (cursor paging)
    #[arg(long)]
    pub cursor: Option<String>,

    /// Don't use cached result
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
