//! Wazo server configuration.
//!
//! Servers are read from `WAZO_HOST`/`WAZO_TOKEN` for the primary server and
//! `WAZO_HOST{n}`/`WAZO_TOKEN{n}` (n = 2, 3, ...) for additional ones. Numbering
//! stops at the first missing pair.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ConfigError;

/// Default extension whose line is offered when a device has no line.
pub const DEFAULT_FALLBACK_EXTEN: &str = "1000";

/// Connection settings for one Wazo server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub name: String,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            name: name.into(),
        }
    }
}

/// How the servers to scan were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Explicit `--host`/`--token` pair; API errors are fatal.
    Override,
    /// A single configured server picked by index.
    Indexed,
    /// Every configured server, in order.
    All,
}

/// Ordered servers to scan plus how they were picked.
#[derive(Debug, Clone)]
pub struct ServerPlan {
    pub servers: Vec<ServerConfig>,
    pub selection: Selection,
}

impl ServerPlan {
    /// Whether an API error on a server should abort the whole run.
    pub fn fail_fast(&self) -> bool {
        self.selection == Selection::Override
    }
}

/// Load a `.env` file from the working directory, or next to the executable.
///
/// Values from the file override the process environment. A missing file is
/// not an error.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = env::current_exe().ok().as_deref().and_then(Path::parent) {
        candidates.push(dir.join(".env"));
    }
    load_first_dotenv(&candidates)
}

/// Load the first existing file among `candidates`.
pub fn load_first_dotenv(candidates: &[PathBuf]) -> Result<Option<PathBuf>, ConfigError> {
    let Some(path) = candidates.iter().find(|p| p.is_file()) else {
        return Ok(None);
    };
    dotenvy::from_path_override(path)?;
    tracing::debug!("Loaded environment from {}", path.display());
    Ok(Some(path.clone()))
}

/// Read all configured servers from the process environment.
pub fn servers_from_env() -> Vec<ServerConfig> {
    servers_from_lookup(|key| env::var(key).ok())
}

/// Read configured servers through an arbitrary variable lookup.
pub fn servers_from_lookup<F>(lookup: F) -> Vec<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: String| lookup(&key).filter(|v| !v.trim().is_empty());

    let mut servers = Vec::new();
    for n in 1.. {
        let suffix = if n == 1 { String::new() } else { n.to_string() };
        let (Some(host), Some(token)) = (
            get(format!("WAZO_HOST{}", suffix)),
            get(format!("WAZO_TOKEN{}", suffix)),
        ) else {
            break;
        };
        let name = get(format!("WAZO_NAME{}", suffix)).unwrap_or_else(|| format!("server {}", n));
        servers.push(ServerConfig::new(host, token, name));
    }

    servers
}

/// Decide which servers to scan.
///
/// Priority: explicit host/token override, then a 1-based server index, then
/// every configured server. A partial override borrows the missing half from
/// the primary configured server.
pub fn select_servers(
    configured: Vec<ServerConfig>,
    host: Option<String>,
    token: Option<String>,
    index: Option<usize>,
) -> Result<ServerPlan, ConfigError> {
    if host.is_some() || token.is_some() {
        let primary = configured.first();
        let host = host
            .or_else(|| primary.map(|s| s.host.clone()))
            .ok_or(ConfigError::MissingOverride("host"))?;
        let token = token
            .or_else(|| primary.map(|s| s.token.clone()))
            .ok_or(ConfigError::MissingOverride("token"))?;
        return Ok(ServerPlan {
            servers: vec![ServerConfig::new(host.clone(), token, host)],
            selection: Selection::Override,
        });
    }

    if configured.is_empty() {
        return Err(ConfigError::NoServers);
    }

    if let Some(index) = index {
        let count = configured.len();
        let server = index
            .checked_sub(1)
            .and_then(|i| configured.into_iter().nth(i))
            .ok_or(ConfigError::InvalidServerIndex { index, count })?;
        return Ok(ServerPlan {
            servers: vec![server],
            selection: Selection::Indexed,
        });
    }

    Ok(ServerPlan {
        servers: configured,
        selection: Selection::All,
    })
}
