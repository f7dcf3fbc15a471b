//! CLI administration tool for the URL shortener.
//!
//! Works directly against the database through [`UrlService`], without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show statistics for a code
//! cargo run --bin admin -- stats aZ3kQ9
//!
//! # Shorten a URL (optionally with a custom code)
//! cargo run --bin admin -- shorten example.com/page --code promo
//!
//! # Delete a code (asks for confirmation unless --yes)
//! cargo run --bin admin -- delete aZ3kQ9
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the server (`DATABASE_URL` or `DB_*`), plus
//! `BASE_URL` for printed short URLs.

use shortener::application::services::UrlService;
use shortener::config;
use shortener::domain::repositories::UrlRepository;
use shortener::infrastructure::persistence::{PgUrlRepository, connect_pool};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing short URLs.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics for a short code
    Stats {
        /// Short code to inspect
        code: String,
    },

    /// Create a short URL
    Shorten {
        /// URL to shorten (scheme optional)
        url: String,

        /// Custom short code
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a short code
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count stored URLs
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect_pool(&config).await?;
    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    // Lookups from the CLI are not counted as clicks: the receiver is dropped.
    let (click_tx, _) = mpsc::channel(1);
    let service = UrlService::new(repository, click_tx, config.base_url);

    match cli.command {
        Commands::Stats { code } => show_stats(&service, &code).await?,
        Commands::Shorten { url, code } => shorten(&service, &url, code).await?,
        Commands::Delete { code, yes } => delete(&service, &code, yes).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Prints click statistics for one code.
async fn show_stats(service: &UrlService, code: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service
        .get_url_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    let last_accessed = stats
        .last_accessed
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:          {}", stats.short_code.cyan());
    println!("  Short URL:     {}", service.short_url(&stats.short_code).bright_white());
    println!("  Original URL:  {}", stats.original_url.bright_white());
    println!(
        "  Created:       {}",
        stats.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!(
        "  Clicks:        {}",
        stats.click_count.to_string().bright_green().bold()
    );
    println!("  Last accessed: {}", last_accessed.bright_black());
    println!();

    Ok(())
}

/// Creates a short URL, with a custom code when given.
async fn shorten(service: &UrlService, url: &str, custom_code: Option<String>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let result = match custom_code {
        Some(custom) => {
            service
                .create_short_url_with_custom_code(url.trim(), custom.trim())
                .await
        }
        None => service.create_short_url(url.trim()).await,
    };

    let code = result.map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Short URL ready".green().bold());
    println!("  Code:      {}", code.cyan());
    println!("  Short URL: {}", service.short_url(&code).bright_yellow().bold());
    println!();

    Ok(())
}

/// Deletes a code after confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Shows the target URL before asking
async fn delete(service: &UrlService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short URL".bright_blue().bold());
    println!();

    let stats = service
        .get_url_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot delete '{}': {}", code, e))?;

    println!("  Code:         {}", stats.short_code.cyan());
    println!("  Original URL: {}", stats.original_url.bright_white());
    println!("  Clicks:       {}", stats.click_count.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_url(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete: {}", e))?;

    println!();
    println!("{}", "✅ Short URL deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, service: &UrlService) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let count = service
                .count_urls()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Stored URLs: {}",
                count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
