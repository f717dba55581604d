//! CLI administration tool for tinylink.
//!
//! Manages links, shows statistics and runs database maintenance directly
//! against PostgreSQL, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Show one link
//! cargo run --bin admin -- links show Ab3dEf
//!
//! # Create a link with a random or custom code
//! cargo run --bin admin -- links create https://example.com/a
//! cargo run --bin admin -- links create https://example.com/a --code promo2025
//!
//! # Delete a link
//! cargo run --bin admin -- links delete Ab3dEf
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): public origin used when printing short URLs

use tinylink::application::services::LinkService;
use tinylink::domain::entities::Link;
use tinylink::infrastructure::persistence::PgLinkRepository;
use tinylink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

type Service = LinkService<PgLinkRepository>;

/// CLI tool for managing tinylink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Show a single link
    Show {
        /// Short code
        code: String,
    },

    /// Create a new link
    Create {
        /// Target URL (prompted for if omitted)
        url: Option<String>,

        /// Custom code (6-8 alphanumeric characters, random if omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Permanently delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let base_url = std::env::var("BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &base_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repository, Arc::new(RandomCodeGenerator::new()));

    match action {
        LinkAction::List => list_links(&service, base_url).await?,
        LinkAction::Show { code } => show_link(&service, base_url, &code).await?,
        LinkAction::Create { url, code, yes } => {
            create_link(&service, base_url, url, code, yes).await?
        }
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// Links
///
///   Code      Clicks   Created            Target
///   ──────────────────────────────────────────────────────────────
///   Ab3dEf    12       2025-01-15 10:30   https://example.com/a
/// ```
async fn list_links(service: &Service, base_url: &str) -> Result<()> {
    println!("{}", "Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let clicks = if link.was_clicked() {
            link.total_clicks.to_string().bright_green()
        } else {
            link.total_clicks.to_string().bright_black()
        };

        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            clicks,
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!(
        "  Total: {}  (short URLs under {})",
        links.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Prints every field of one link.
async fn show_link(service: &Service, base_url: &str, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    print_link(&link, base_url);

    Ok(())
}

/// Creates a link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the target URL (or use the provided one)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Insert through [`LinkService`], which validates and allocates the code
async fn create_link(
    service: &Service,
    base_url: &str,
    url: Option<String>,
    code: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create Short Link".bright_blue().bold());
    println!();

    let target_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  Target: {}", target_url.cyan());
    match code.as_deref() {
        Some(c) => println!("  Code:   {}", c.bright_yellow()),
        None => println!("  Code:   {}", "(random)".bright_black()),
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create_link(&target_url, code.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!();
    println!("{}", "Link created successfully!".green().bold());
    println!();
    print_link(&link, base_url);

    Ok(())
}

/// Deletes a link with confirmation prompt (default: No).
async fn delete_link(service: &Service, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url);
    println!(
        "  Clicks: {}",
        link.total_clicks.to_string().bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    if deleted {
        println!("{}", "Link deleted.".green().bold());
    } else {
        println!("{}", "Link was already gone.".yellow());
    }
    println!();

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    let last_clicked = link
        .last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!("  Code:         {}", link.code.cyan());
    println!(
        "  Short URL:    {}",
        format!("{}/{}", base_url, link.code).bright_yellow()
    );
    println!("  Target:       {}", link.target_url);
    println!(
        "  Clicks:       {}",
        link.total_clicks.to_string().bright_green().bold()
    );
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total_clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let clicked_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE total_clicks > 0")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:          {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:         {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicked links:  {}",
        clicked_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database maintenance commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
