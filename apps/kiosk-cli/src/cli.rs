//! # Command-Line Interface
//!
//! ```text
//! kiosk [--db <path>] [--config <path>] [--json] <command>
//!
//!   add <name> <buy> <sell> <qty>     add a product or restock by name
//!   sell <id> <qty>                   record a sale
//!   targets                           products that can be sold now
//!   hide <id> | restore <id>          toggle visibility
//!   delete <id> [--yes]               remove permanently (asks first)
//!   new-day [--yes]                   zero today's sold counters (asks first)
//!   list [--hidden|--sellable|--all]  show products (default: active)
//!   profit                            today's profit
//!   backup [--out <path>]             write a JSON backup
//! ```

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands::product::ProductFilter;

#[derive(Parser, Debug)]
#[command(name = "kiosk", version, about = "Stock, sales and daily profit for a small kiosk")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Database file (overrides config and KIOSK_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: kiosk.toml in the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a product, or restock the one with the same name
    Add {
        name: String,
        /// Unit cost, e.g. 12.50
        #[arg(allow_hyphen_values = true)]
        buying_price: String,
        /// Unit selling price
        #[arg(allow_hyphen_values = true)]
        selling_price: String,
        /// Units to add to stock
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Record a sale
    Sell {
        id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// List products that can be sold now
    Targets,

    /// Hide a product from the active list
    Hide { id: String },

    /// Make a hidden product visible again
    Restore { id: String },

    /// Delete a product permanently
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Start a new day: zero every sold counter
    NewDay {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show products
    List(ListArgs),

    /// Show today's profit
    Profit,

    /// Write a JSON backup of every product
    Backup {
        /// Output file (default: from config, kiosk-backup.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct ListArgs {
    /// Only hidden products
    #[arg(long, conflicts_with_all = ["sellable", "all"])]
    pub hidden: bool,

    /// Only visible products with stock
    #[arg(long, conflicts_with = "all")]
    pub sellable: bool,

    /// Every product
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    pub fn filter(&self) -> ProductFilter {
        if self.hidden {
            ProductFilter::Hidden
        } else if self.sellable {
            ProductFilter::Sellable
        } else if self.all {
            ProductFilter::All
        } else {
            ProductFilter::Active
        }
    }
}

/// Asks a yes/no question. Only `y` or `yes` (any case) confirms; end of
/// input declines.
pub fn confirm<R: BufRead, W: Write>(question: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
