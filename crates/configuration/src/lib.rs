use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AuthSettings, DatabaseSettings, RepositorySettings, ServerSettings, Settings, UpdateKeyCheck,
};

/// Environment variables are read as `CLINIC__<SECTION>__<KEY>`,
/// e.g. `CLINIC__AUTH__TOKEN`.
const ENV_PREFIX: &str = "CLINIC";
const DEFAULT_FILE: &str = "clinic.toml";

/// Loads the application configuration from `clinic.toml` (if present) and
/// the environment.
///
/// This is read once at startup; the result is shared immutably for the life
/// of the process.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from(DEFAULT_FILE)
}

/// Same as [`load_config`], reading the optional file at `path`.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    load(path, ENV_PREFIX)
}

/// Layers defaults, the file at `path` and `<env_prefix>__*` variables.
fn load(path: &str, env_prefix: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.url", "")?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("auth.token", "")?
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    validate(&settings)?;

    tracing::debug!(
        addr = %settings.server.addr(),
        update_key_check = ?settings.repository.update_key_check,
        "Configuration loaded."
    );
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.auth.token.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.token must be set".to_string(),
        ));
    }
    if settings.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
