pub mod app;
pub mod ui;

use clap::{Parser, Subcommand};
use pantry::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Track pantry items, quantities and categories")]
pub struct Cli {
    /// JSON file holding the inventory (overrides PANTRY_STORE_PATH)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show items, optionally filtered and sorted
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// quantity-asc, quantity-desc, category, alphabetical, last-added, first-added
        #[arg(long, default_value = "")]
        sort: String,
    },
    /// Add units of an item
    Add {
        name: String,
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
        /// One of the listed categories (see `pantry categories`)
        #[arg(long, short, value_parser = listed_category)]
        category: Option<Category>,
    },
    /// Add a single unit
    Increment { name: String },
    /// Remove a single unit
    Decrement { name: String },
    /// Remove several units, or the whole item
    Delete {
        name: String,
        #[arg(long, short, default_value_t = 1)]
        amount: u32,
    },
    /// List selectable categories
    Categories,
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Keep the inventory in memory instead of a file
        #[arg(long)]
        memory: bool,
    },
}

fn listed_category(raw: &str) -> Result<Category, String> {
    Category::parse_listed(raw)?.ok_or_else(|| "category must not be blank".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accepts_listed_category() {
        let cli = Cli::try_parse_from(["pantry", "add", "apples", "-c", "Fruits"]).unwrap();
        match cli.command {
            Command::Add { category, .. } => assert_eq!(category, Some(Category::Fruits)),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_add_rejects_unlisted_category() {
        assert!(Cli::try_parse_from(["pantry", "add", "apples", "-c", "fruits"]).is_err());
        assert!(Cli::try_parse_from(["pantry", "add", "chips", "--category", "Snacks"]).is_err());
        assert!(Cli::try_parse_from(["pantry", "add", "chips", "-c", " "]).is_err());
    }
}
