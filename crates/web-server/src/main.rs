use database::PgStore;
use services::Services;
use std::sync::Arc;

// This main function is the entry point when running `cargo run -p web-server`.
// It serves the PostgreSQL-backed application with the settings from the
// environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = configuration::load_config()?;
    let pool = database::connect(&settings.database).await?;
    database::run_migrations(&pool).await?;

    let services = Services::new(
        Arc::new(PgStore::new(pool)),
        settings.repository.update_key_check,
    );
    web_server::run_server(settings, services).await
}
