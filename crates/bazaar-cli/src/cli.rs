use std::path::PathBuf;

use bazaar_catalog::{ListingId, EXPORT_FILE_NAME};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bazaar",
    about = "Book Bazaar: buy and sell used textbooks",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the stored collections
    #[arg(long, global = true, env = "BAZAAR_DATA_DIR", default_value = ".bazaar")]
    pub data_dir: PathBuf,

    /// TOML file with board settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Post a book for sale
    Post(PostArgs),
    /// Browse listings with filters
    List(ListArgs),
    /// Show one listing in full
    Show(IdArgs),
    /// Show how to reach the seller
    Contact(IdArgs),
    /// Add a listing to the wishlist, or remove it if already there
    Wish(IdArgs),
    /// Show the wishlist
    Wishlist,
    /// Delete a listing
    Delete(IdArgs),
    /// Write all data to a JSON file ("-" for stdout)
    Export(ExportArgs),
    /// Replace data from a JSON export
    Import(ImportArgs),
    /// Show listing and wishlist counts
    Stats,
}

#[derive(Args)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub condition: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub contact: String,
    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long, default_value = "")]
    pub query: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub condition: String,
    #[arg(long, default_value = "")]
    pub min: String,
    #[arg(long, default_value = "")]
    pub max: String,
    /// latest, price-low, or price-high
    #[arg(long, default_value = "latest")]
    pub sort: String,
    /// How many pages of results to show
    #[arg(long, default_value = "1")]
    pub pages: usize,
}

#[derive(Args)]
pub struct IdArgs {
    pub id: ListingId,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(default_value = EXPORT_FILE_NAME)]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    pub path: PathBuf,
}
