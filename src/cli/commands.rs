use crate::units::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unitconv")]
#[command(author, version, about = "Convert between units and keep a history of conversions", long_about = None)]
pub struct Cli {
    /// Directory holding the conversion history (overrides configuration)
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single value and record it in the history
    Convert {
        /// temperature, length, weight, currency, data-storage or time
        category: Category,

        /// Source unit symbol or name (e.g. "mi", "Celsius")
        from: String,

        /// Target unit symbol or name
        to: String,

        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Show the most recent conversions
    History {
        /// Number of entries to show (default from configuration)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show conversion statistics
    Stats,

    /// Delete the whole conversion history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List the units of one or all categories
    Units { category: Option<Category> },
}
