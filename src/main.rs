use clap::{Parser, Subcommand};
use configuration::UpdateKeyCheck;
use database::{MemoryStore, PgStore};
use services::Services;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the clinic backend.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Logs go through a background writer; the guard flushes it on exit.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Migrate => handle_migrate().await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Dental clinic management backend: patients, dentists and appointments over HTTP/JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Keep all data in process memory instead of PostgreSQL.
    #[arg(long)]
    in_memory: bool,

    /// Override the port from the configuration.
    #[arg(long)]
    port: Option<u16>,

    /// Override how updates check the unique DNI / license.
    #[arg(long, value_enum)]
    update_key_check: Option<UpdateKeyCheck>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut settings = configuration::load_config()?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    if let Some(key_check) = args.update_key_check {
        settings.repository.update_key_check = key_check;
    }
    let key_check = settings.repository.update_key_check;

    let services = if args.in_memory {
        tracing::warn!("Serving from process memory; data is lost on exit.");
        Services::new(Arc::new(MemoryStore::new()), key_check)
    } else {
        let pool = database::connect(&settings.database).await?;
        database::run_migrations(&pool).await?;
        Services::new(Arc::new(PgStore::new(pool)), key_check)
    };

    web_server::run_server(settings, services).await
}

async fn handle_migrate() -> anyhow::Result<()> {
    let settings = configuration::load_config()?;
    let pool = database::connect(&settings.database).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("Migrations applied.");
    Ok(())
}
