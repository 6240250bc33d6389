use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use bazaar_catalog::{
    BazaarConfig, Board, BoardView, Catalog, FilterInputs, Listing, ListingCard, ListingId,
    NewListing, Refresh, SystemClock, WishlistChange, WishlistView, CATEGORIES, CONDITIONS,
};
use bazaar_store::FileKeyValueStore;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use crate::cli::*;

type FileCatalog = Catalog<FileKeyValueStore, SystemClock>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut catalog = open_catalog(&cli)?;
    let format = cli.format;
    match cli.command {
        Command::Post(args) => cmd_post(&mut catalog, args, &format),
        Command::List(args) => cmd_list(catalog, args, &format),
        Command::Show(args) => cmd_show(&catalog, args.id, &format),
        Command::Contact(args) => cmd_contact(&catalog, args.id, &format),
        Command::Wish(args) => cmd_wish(&mut catalog, args.id, &format),
        Command::Wishlist => cmd_wishlist(&catalog, &format),
        Command::Delete(args) => cmd_delete(&mut catalog, args.id, &format),
        Command::Export(args) => cmd_export(&catalog, &args.path),
        Command::Import(args) => cmd_import(&mut catalog, &args.path, &format),
        Command::Stats => cmd_stats(&catalog, &format),
    }
}

fn open_catalog(cli: &Cli) -> anyhow::Result<FileCatalog> {
    let config = match &cli.config {
        Some(path) => BazaarConfig::load(path)?,
        None => BazaarConfig::default(),
    };
    let storage = FileKeyValueStore::open(&cli.data_dir);
    let catalog = Catalog::open(storage, SystemClock, config)
        .with_context(|| format!("opening data in {}", cli.data_dir.display()))?;
    for key in catalog.recovered_keys() {
        eprintln!(
            "{} stored {} data was unreadable and has been reset",
            "warning:".yellow().bold(),
            key
        );
    }
    Ok(catalog)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn missing(id: ListingId) {
    println!("No listing with id {}.", id.to_string().yellow());
}

fn cmd_post(catalog: &mut FileCatalog, args: PostArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let listing = catalog.post(NewListing {
        title: args.title,
        author: args.author,
        category: args.category,
        condition: args.condition,
        price: args.price,
        description: args.description,
        contact: args.contact,
        image: args.image,
    })?;
    match format {
        OutputFormat::Json => print_json(&listing),
        OutputFormat::Text => {
            println!("{} Book posted successfully!", "✓".green().bold());
            println!("  Id: {}", listing.id.to_string().yellow());
            Ok(())
        }
    }
}

fn cmd_list(catalog: FileCatalog, args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mut board = Board::new(catalog);
    board.set_filters(FilterInputs {
        text: args.query,
        category: args.category,
        condition: args.condition,
        min_price: args.min,
        max_price: args.max,
        sort: args.sort,
    });
    for _ in 1..args.pages {
        if board.load_more() == Refresh::Unchanged {
            break;
        }
    }

    let view = board.view();
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print_board(&view);
            Ok(())
        }
    }
}

fn print_board(view: &BoardView) {
    if view.is_empty {
        println!("No books found. Try different filters.");
        return;
    }
    for card in &view.cards {
        print_card(card);
    }
    println!(
        "\nShowing {} of {} matching ({} listed, {} in wishlist)",
        view.cards.len().to_string().bold(),
        view.total_matches,
        view.total_listings,
        view.wishlist_count
    );
    if view.has_more {
        println!("More results available: use {}", "--pages".cyan());
    }
}

fn print_card(card: &ListingCard) {
    let heart = if card.wishlisted { " ♥".red().to_string() } else { String::new() };
    println!(
        "{} {} by {}{}",
        format!("[{}]", card.id).dimmed(),
        card.title.bold(),
        card.author,
        heart
    );
    println!(
        "    {} | {} | {}",
        card.category.cyan(),
        card.condition,
        card.price_label.green().bold()
    );
}

fn cmd_show(catalog: &FileCatalog, id: ListingId, format: &OutputFormat) -> anyhow::Result<()> {
    let Some(detail) = catalog.detail(id) else {
        missing(id);
        return Ok(());
    };
    match format {
        OutputFormat::Json => print_json(&detail),
        OutputFormat::Text => {
            let heart = if detail.wishlisted { " ♥".red().to_string() } else { String::new() };
            println!("{}{}", detail.title.bold(), heart);
            println!("  Author:      {}", detail.author);
            println!("  Category:    {}", detail.category.cyan());
            println!("  Condition:   {}", detail.condition);
            println!("  Price:       {}", detail.price_label.green().bold());
            if let Some(description) = &detail.description {
                println!("  Description: {description}");
            }
            println!("  Image:       {}", detail.image.blue());
            Ok(())
        }
    }
}

fn cmd_contact(catalog: &FileCatalog, id: ListingId, format: &OutputFormat) -> anyhow::Result<()> {
    let Some(card) = catalog.contact(id) else {
        missing(id);
        return Ok(());
    };
    match format {
        OutputFormat::Json => print_json(&card),
        OutputFormat::Text => {
            println!("{}", card.message());
            Ok(())
        }
    }
}

fn cmd_wish(catalog: &mut FileCatalog, id: ListingId, format: &OutputFormat) -> anyhow::Result<()> {
    let Some(change) = catalog.toggle_wishlist(id)? else {
        missing(id);
        return Ok(());
    };
    match format {
        OutputFormat::Json => print_json(&json!({ "id": id, "change": change })),
        OutputFormat::Text => {
            match change {
                WishlistChange::Added => println!("{} Added to wishlist", "♥".red()),
                WishlistChange::Removed => println!("Removed from wishlist"),
            }
            Ok(())
        }
    }
}

fn cmd_wishlist(catalog: &FileCatalog, format: &OutputFormat) -> anyhow::Result<()> {
    let view = catalog.wishlist_view();
    match format {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print_wishlist(&view);
            Ok(())
        }
    }
}

fn print_wishlist(view: &WishlistView) {
    if view.is_empty() {
        println!("{}", bazaar_catalog::view::EMPTY_WISHLIST_MESSAGE);
        return;
    }
    for item in &view.items {
        println!(
            "{} {} by {}  {}",
            format!("[{}]", item.id).dimmed(),
            item.title.bold(),
            item.author,
            item.price_label.green().bold()
        );
    }
}

fn cmd_delete(catalog: &mut FileCatalog, id: ListingId, format: &OutputFormat) -> anyhow::Result<()> {
    let deleted = catalog.delete(id)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "id": id, "deleted": deleted })),
        OutputFormat::Text => {
            if deleted {
                println!("{} Book deleted successfully", "✓".green().bold());
            } else {
                missing(id);
            }
            Ok(())
        }
    }
}

fn cmd_export(catalog: &FileCatalog, path: &Path) -> anyhow::Result<()> {
    let json = catalog.export_json()?;
    if path == Path::new("-") {
        println!("{json}");
        return Ok(());
    }
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    println!(
        "{} Data exported successfully to {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    Ok(())
}

fn cmd_import(catalog: &mut FileCatalog, path: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let input = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let summary = catalog
        .import_json(&input)
        .context("Error importing data!")?;
    match format {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Text => {
            println!("{} Data imported successfully!", "✓".green().bold());
            if let Some(books) = summary.books {
                println!("  Books: {}", books.to_string().bold());
            }
            if let Some(wishlist) = summary.wishlist {
                println!("  Wishlist: {}", wishlist.to_string().bold());
            }
            Ok(())
        }
    }
}

fn cmd_stats(catalog: &FileCatalog, format: &OutputFormat) -> anyhow::Result<()> {
    let count_by = |values: &[&str], field: fn(&Listing) -> &str| -> Vec<(String, usize)> {
        values
            .iter()
            .map(|v| {
                let n = catalog.listings().iter().filter(|l| field(l) == *v).count();
                (v.to_string(), n)
            })
            .collect()
    };
    let categories = count_by(CATEGORIES, |l| l.category.as_str());
    let conditions = count_by(CONDITIONS, |l| l.condition.as_str());

    match format {
        OutputFormat::Json => print_json(&json!({
            "total_books": catalog.len(),
            "wishlist": catalog.wishlist_len(),
            "categories": categories.into_iter().collect::<BTreeMap<_, _>>(),
            "conditions": conditions.into_iter().collect::<BTreeMap<_, _>>(),
        })),
        OutputFormat::Text => {
            println!("Total books:    {}", catalog.len().to_string().bold());
            println!("Wishlist items: {}", catalog.wishlist_len().to_string().bold());
            for (label, rows) in [("By category", categories), ("By condition", conditions)] {
                println!("\n{label}:");
                for (name, n) in rows.into_iter().filter(|(_, n)| *n > 0) {
                    println!("  {:<12} {}", name.cyan(), n);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_catalog::{BOOKS_KEY, WISHLIST_KEY};
    use bazaar_store::KeyValueStore;
    use clap::Parser;

    fn run(data_dir: &Path, args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["bazaar", "--data-dir", data_dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        run_command(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn list_on_fresh_dir_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["list"]).unwrap();
        assert!(FileKeyValueStore::open(dir.path()).keys().unwrap().is_empty());
    }

    #[test]
    fn post_persists_to_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &[
                "post", "--title", "Physics", "--author", "HC Verma", "--category", "Science",
                "--condition", "Good", "--price", "320", "--contact", "555",
            ],
        )
        .unwrap();
        let store = FileKeyValueStore::open(dir.path());
        let books = store.get(BOOKS_KEY).unwrap().unwrap();
        assert!(books.contains("\"Physics\""));
        assert_eq!(store.get(WISHLIST_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn invalid_post_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            &[
                "post", "--title", "", "--author", "A", "--category", "Arts",
                "--condition", "New", "--price", "1", "--contact", "555",
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn wish_and_delete_seeded_listing() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["wish", "2"]).unwrap();
        let store = FileKeyValueStore::open(dir.path());
        assert!(store.get(WISHLIST_KEY).unwrap().unwrap().contains("Gatsby"));

        run(dir.path(), &["delete", "2"]).unwrap();
        assert_eq!(store.get(WISHLIST_KEY).unwrap().as_deref(), Some("[]"));
        run(dir.path(), &["delete", "2"]).unwrap();
    }

    #[test]
    fn unknown_ids_are_not_errors() {
        let dir = tempfile::tempdir().unwrap();
        for cmd in ["show", "contact", "wish", "delete"] {
            run(dir.path(), &[cmd, "999"]).unwrap();
        }
    }

    #[test]
    fn export_then_import_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        let target = dir.path().join("target");
        let file = dir.path().join("export.json");
        let file_arg = file.to_str().unwrap();

        run(&source, &["wish", "5"]).unwrap();
        run(&source, &["export", file_arg]).unwrap();
        run(&target, &["import", file_arg]).unwrap();

        let a = FileKeyValueStore::open(&source);
        let b = FileKeyValueStore::open(&target);
        assert_eq!(a.get(BOOKS_KEY).unwrap(), b.get(BOOKS_KEY).unwrap());
        assert_eq!(a.get(WISHLIST_KEY).unwrap(), b.get(WISHLIST_KEY).unwrap());
    }

    #[test]
    fn import_of_malformed_file_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, "{ nope").unwrap();
        let err = run(dir.path(), &["import", file.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("Error importing data!"));
        assert!(FileKeyValueStore::open(dir.path()).get(BOOKS_KEY).unwrap().is_none());
    }

    #[test]
    fn config_file_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bazaar.toml");
        fs::write(&config, "seed_sample_data = false\n").unwrap();
        let cli = Cli::try_parse_from([
            "bazaar",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "stats",
        ])
        .unwrap();
        let catalog = open_catalog(&cli).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn json_format_runs() {
        let dir = tempfile::tempdir().unwrap();
        for args in [&["--format", "json", "list"][..], &["--format", "json", "wishlist"][..]] {
            run(dir.path(), args).unwrap();
        }
    }
}
