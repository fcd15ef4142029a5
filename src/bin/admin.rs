//! CLI administration tool for link-shortener.
//!
//! Works directly against the PostgreSQL store, without the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection and show counts
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Inspect and manage links
//! cargo run --bin admin -- links list --range "[0,9]"
//! cargo run --bin admin -- links show 42
//! cargo run --bin admin -- links delete 42
//!
//! # Inspect visits
//! cargo run --bin admin -- visits list
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use link_shortener::api::dto::range::{RangeQuery, content_range};
use link_shortener::application::services::{LinkService, VisitService};
use link_shortener::config::{Config, mask_connection_string};
use link_shortener::domain::entities::{Link, Visit};
use link_shortener::domain::pagination::RangeSpec;
use link_shortener::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect recorded visits
    Visits {
        #[command(subcommand)]
        action: VisitAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show row counts
    Check,

    /// Apply pending migrations
    Migrate,
}

#[derive(Subcommand)]
enum LinkAction {
    /// List links ordered by id
    List {
        /// Inclusive zero-based row range, e.g. "[0,9]"
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Show a single link
    Show { id: i64 },

    /// Delete a link (its visits are kept)
    Delete {
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum VisitAction {
    /// List visits, newest first
    List {
        /// Inclusive zero-based row range, e.g. "[0,9]"
        #[arg(short, long)]
        range: Option<String>,
    },
}

type Links = LinkService<PgLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", mask_connection_string(&database_url)))?;
    let pool = Arc::new(pool);

    let link_service = Arc::new(LinkService::new(Arc::new(PgLinkRepository::new(
        Arc::clone(&pool),
    ))));

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool, &link_service).await?,
        Commands::Links { action } => handle_link_action(action, &link_service).await?,
        Commands::Visits { action } => {
            let visit_service = VisitService::new(
                Arc::clone(&link_service),
                Arc::new(PgVisitRepository::new(Arc::clone(&pool))),
            );
            match action {
                VisitAction::List { range } => list_visits(&visit_service, range).await?,
            }
        }
    }

    Ok(())
}

fn parse_range(range: Option<String>) -> Result<Option<RangeSpec>> {
    RangeQuery { range }
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid range: {e}"))
}

async fn handle_db_action(action: DbAction, pool: &PgPool, links: &Links) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Database check".bright_blue().bold());
            println!();

            let link_count = links
                .count_links()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {e}"))?;
            let visit_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_visits")
                .fetch_one(pool)
                .await
                .context("Failed to count visits")?;

            println!("  {}", "Connection OK".green());
            println!("  Links:  {}", link_count.to_string().bright_white().bold());
            println!("  Visits: {}", visit_count.to_string().bright_white().bold());
            println!();
        }
        DbAction::Migrate => {
            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to apply migrations")?;
            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, links: &Links) -> Result<()> {
    match action {
        LinkAction::List { range } => {
            let page = links
                .list_links(parse_range(range)?)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {e}"))?;

            if page.items.is_empty() {
                println!("{}", "  No links found".yellow());
            } else {
                println!(
                    "  {:<6} {:<36} {:<8} {}",
                    "ID".bright_white().bold(),
                    "Short name".bright_white().bold(),
                    "Code".bright_white().bold(),
                    "Original URL".bright_white().bold()
                );
                println!("  {}", "-".repeat(90).bright_black());
                for link in &page.items {
                    print_link_row(link);
                }
            }
            println!();
            println!("  {}", content_range("links", &page).bright_black());
        }
        LinkAction::Show { id } => {
            let link = links
                .get_link_by_id(id)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;

            println!("  ID:           {}", link.id.to_string().bright_black());
            println!("  Short name:   {}", link.short_name.cyan());
            println!("  Code:         {}", link.short_url.bright_yellow());
            println!("  Original URL: {}", link.original_url);
        }
        LinkAction::Delete { id, yes } => {
            let link = links
                .get_link_by_id(id)
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;

            println!("  Link:  {} -> {}", link.short_name.cyan(), link.original_url);
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            links
                .delete_link(id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete link: {e}"))?;

            println!("{}", "Link deleted".green().bold());
        }
    }

    Ok(())
}

fn print_link_row(link: &Link) {
    println!(
        "  {:<6} {:<36} {:<8} {}",
        link.id.to_string().bright_black(),
        link.short_name.cyan(),
        link.short_url.bright_yellow(),
        link.original_url
    );
}

async fn list_visits(
    visits: &VisitService<PgLinkRepository, PgVisitRepository>,
    range: Option<String>,
) -> Result<()> {
    let page = visits
        .list_visits(parse_range(range)?)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list visits: {e}"))?;

    if page.items.is_empty() {
        println!("{}", "  No visits recorded".yellow());
    } else {
        println!(
            "  {:<6} {:<8} {:<20} {:<16} {}",
            "ID".bright_white().bold(),
            "Link".bright_white().bold(),
            "When".bright_white().bold(),
            "IP".bright_white().bold(),
            "User agent".bright_white().bold()
        );
        println!("  {}", "-".repeat(90).bright_black());
        for visit in &page.items {
            print_visit_row(visit);
        }
    }
    println!();
    println!("  {}", content_range("link_visits", &page).bright_black());

    Ok(())
}

fn print_visit_row(visit: &Visit) {
    println!(
        "  {:<6} {:<8} {:<20} {:<16} {}",
        visit.id.to_string().bright_black(),
        visit.link_id.to_string().cyan(),
        visit.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        visit.ip,
        visit.user_agent.bright_black()
    );
}
