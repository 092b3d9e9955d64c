use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

/// Connection parameters for the PostgreSQL pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// A `postgres://` connection string.
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// The shared secret that mutating requests must carry in the `TOKEN` header.
#[derive(Clone, Deserialize)]
pub struct AuthSettings {
    pub token: String,
}

// Keep the secret out of logs.
impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings").field("token", &"<redacted>").finish()
    }
}

/// Behavior switches for the repository layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositorySettings {
    #[serde(default)]
    pub update_key_check: UpdateKeyCheck,
}

/// How `update` treats the unique business key (patient DNI, dentist license)
/// of the merged record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum UpdateKeyCheck {
    /// The key must already be held by some record, otherwise the update is
    /// refused. Changing a DNI or license to a fresh value is therefore
    /// impossible. This is the historical behavior.
    #[default]
    RequireExisting,
    /// The update is refused only when a different record already holds the
    /// key.
    RejectDuplicate,
}
