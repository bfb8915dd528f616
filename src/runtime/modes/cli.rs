//! CLI mode
//!
//! One-shot dictionary commands that talk to the database directly.

use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::services::{AbbreviationService, seed_if_empty};
use crate::storage::{AbbreviationEntry, EntryStore, StorageFactory};

async fn open_service() -> Result<AbbreviationService> {
    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    let store: Arc<dyn EntryStore> = storage;
    Ok(AbbreviationService::new(store))
}

fn print_entry(entry: &AbbreviationEntry) {
    println!(
        "  {} {} {}",
        entry.abbreviation.cyan().bold(),
        "→".dimmed(),
        entry.full_name
    );
}

/// 执行 serve 以外的子命令
pub async fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Serve => super::run_server().await,
        Commands::Seed => {
            let service = open_service().await?;
            let inserted = seed_if_empty(service.store().as_ref()).await?;
            if inserted == 0 {
                println!("{} table is not empty, nothing inserted", "ℹ".blue());
            } else {
                println!("{} inserted {} sample abbreviations", "✓".green(), inserted);
            }
            Ok(())
        }
        Commands::Search { query } => {
            let service = open_service().await?;
            let resolution = service.resolve(&query).await?;

            if resolution.matches.is_empty() {
                println!("{}", "No matches".yellow());
            } else {
                println!("{} ({})", "Found".green().bold(), resolution.matches.len());
                resolution.matches.iter().for_each(print_entry);
            }
            if !resolution.unmatched.is_empty() {
                println!(
                    "{} {}",
                    "Not found:".red().bold(),
                    resolution.unmatched.join(", ")
                );
            }
            Ok(())
        }
        Commands::Add {
            abbreviation,
            full_name,
        } => {
            let service = open_service().await?;
            let entry = service.add(&abbreviation, &full_name).await?;
            println!("{} added ({})", "✓".green(), entry.id.dimmed());
            print_entry(&entry);
            Ok(())
        }
        Commands::Hot { limit } => {
            let service = open_service().await?;
            let entries = service.hot(limit).await?;
            if entries.is_empty() {
                println!("{}", "No entries".yellow());
            }
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{:>3}. {} {} {} ({} copies)",
                    i + 1,
                    entry.abbreviation.cyan().bold(),
                    "→".dimmed(),
                    entry.full_name,
                    entry.copy_count
                );
            }
            Ok(())
        }
        Commands::GenerateConfig { output, force } => {
            if std::path::Path::new(&output).exists() && !force {
                anyhow::bail!("{} already exists, use --force to overwrite", output);
            }
            StaticConfig::default()
                .save_to_file(&output)
                .with_context(|| format!("Failed to write {}", output))?;
            println!("{} sample configuration written to {}", "✓".green(), output);
            Ok(())
        }
    }
}
