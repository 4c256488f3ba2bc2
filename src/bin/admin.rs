//! CLI administration tool for medicos-api.
//!
//! Lists and deactivates doctors, shows counts, and checks the database
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List active doctors (same defaults as GET /medicos)
//! cargo run --bin admin -- medicos list --page 0 --size 10 --sort nome,asc
//!
//! # Deactivate a doctor
//! cargo run --bin admin -- medicos deactivate 42
//!
//! # Active / inactive counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection

use medicos_api::application::services::MedicoService;
use medicos_api::config::Config;
use medicos_api::domain::entities::Medico;
use medicos_api::domain::pagination::{PageRequest, Sort};
use medicos_api::error::AppError;
use medicos_api::infrastructure::persistence::PgMedicoRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing medicos-api.
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
    /// Manage doctors
    Medicos {
        #[command(subcommand)]
        action: MedicoAction,
    },

    /// Show active / inactive counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Doctor management subcommands.
#[derive(Subcommand)]
enum MedicoAction {
    /// List active doctors
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Page size (1-2000)
        #[arg(long, default_value_t = PageRequest::DEFAULT_SIZE)]
        size: u32,

        /// Sort key, e.g. "nome" or "crm,desc"
        #[arg(long, default_value = "nome")]
        sort: String,
    },

    /// Deactivate a doctor (soft delete)
    Deactivate {
        /// Doctor id
        id: i64,

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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Medicos { action } => handle_medico_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches doctor management commands.
async fn handle_medico_action(action: MedicoAction, pool: &PgPool) -> Result<()> {
    let service = MedicoService::new(Arc::new(PgMedicoRepository::new(Arc::new(pool.clone()))));

    match action {
        MedicoAction::List { page, size, sort } => {
            let size = size.clamp(1, PageRequest::MAX_SIZE);
            let request = PageRequest::new(page, size, Sort::parse_lenient(&sort));
            list_medicos(&service, request).await?;
        }
        MedicoAction::Deactivate { id, yes } => {
            deactivate_medico(&service, id, yes).await?;
        }
    }

    Ok(())
}

/// Prints one page of active doctors.
///
/// ```text
/// 🩺 Active doctors (page 1/3, 24 total)
///
///   ID    Nome                      CRM        Especialidade   Email
///   ──────────────────────────────────────────────────────────────────────────
///   1     Ana Silva                 12345      CARDIOLOGIA     ana@x.com
/// ```
async fn list_medicos(
    service: &MedicoService<PgMedicoRepository>,
    request: PageRequest,
) -> Result<()> {
    let page = service
        .list_active(request)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list medicos: {}", e))?;

    println!(
        "{} (page {}/{}, {} total)",
        "🩺 Active doctors".bright_blue().bold(),
        u64::from(page.request.page) + 1,
        page.total_pages().max(1),
        page.total_elements
    );
    println!();

    if page.content.is_empty() {
        println!("{}", "  No doctors on this page".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<10} {:<15} {}",
        "ID".bright_white().bold(),
        "Nome".bright_white().bold(),
        "CRM".bright_white().bold(),
        "Especialidade".bright_white().bold(),
        "Email".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for medico in &page.content {
        println!(
            "  {:<5} {:<25} {:<10} {:<15} {}",
            medico.id.to_string().bright_black(),
            medico.nome.cyan(),
            medico.crm,
            medico.especialidade.as_str(),
            medico.email.bright_black()
        );
    }
    println!();

    Ok(())
}

/// Deactivates a doctor after confirmation. Already inactive doctors are
/// reported and left alone.
async fn deactivate_medico(
    service: &MedicoService<PgMedicoRepository>,
    id: i64,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔒 Deactivate doctor".bright_blue().bold());
    println!();

    let Some(medico) = find_medico(service, id).await? else {
        println!("{}", format!("❌ No doctor with id {id}").red());
        return Ok(());
    };

    if !medico.ativo {
        println!("{}", "⚠️  This doctor is already inactive".yellow());
        return Ok(());
    }

    println!("  Nome: {}", medico.nome.cyan());
    println!("  CRM:  {}", medico.crm.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this doctor?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .deactivate(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to deactivate: {}", e))?;

    println!("{}", "✅ Doctor deactivated".green().bold());
    Ok(())
}

/// Fetches a doctor for display, mapping not-found to `None`.
async fn find_medico(
    service: &MedicoService<PgMedicoRepository>,
    id: i64,
) -> Result<Option<Medico>> {
    match service.find(id).await {
        Ok(medico) => Ok(Some(medico)),
        Err(AppError::NotFound { .. }) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Displays active and inactive doctor counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgMedicoRepository::new(Arc::new(pool.clone()));
    let (active, inactive) = repo
        .count_by_status()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count medicos: {}", e))?;

    println!(
        "  Active:   {}",
        active.to_string().bright_green().bold()
    );
    println!(
        "  Inactive: {}",
        inactive.to_string().bright_black().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
