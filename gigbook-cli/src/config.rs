//! Configuration: `gigbook.toml`, then environment, then command-line flags
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3030"
//! cors_permissive = false
//!
//! [database]
//! url = "postgres://localhost/gigbook"
//! max_connections = 5
//! acquire_timeout_secs = 5
//! statement_timeout_secs = 10
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gigbook_server::{DatabaseConfig, ServerConfig};
use serde::Deserialize;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gigbook.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {var} value '{value}': expected host:port")]
    InvalidBind { var: &'static str, value: String },

    #[error("DATABASE_URL not set. Set it via --database-url, DATABASE_URL or [database].url in gigbook.toml")]
    MissingDatabaseUrl,
}

/// Everything the binary needs to start
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        let defaults = ServerConfig::default();
        Self {
            bind: defaults.bind_addr,
            cors_permissive: defaults.cors_permissive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub statement_timeout_secs: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::new("");
        Self {
            url: None,
            max_connections: defaults.max_connections,
            acquire_timeout_secs: defaults.acquire_timeout.as_secs(),
            statement_timeout_secs: defaults.statement_timeout.as_secs(),
        }
    }
}

impl AppConfig {
    /// Read the config file and apply environment overrides.
    ///
    /// An explicit `path` must exist; the default `gigbook.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// `DATABASE_URL` and `GIGBOOK_BIND` win over the file.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(raw) = lookup("GIGBOOK_BIND") {
            self.server.bind = raw.trim().parse().map_err(|_| ConfigError::InvalidBind {
                var: "GIGBOOK_BIND",
                value: raw,
            })?;
        }
        Ok(())
    }

    /// Pool settings, with `url_flag` taking precedence over everything else.
    pub fn database_config(&self, url_flag: Option<String>) -> Result<DatabaseConfig, ConfigError> {
        let url = url_flag
            .or_else(|| self.database.url.clone())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut config = DatabaseConfig::new(url);
        config.max_connections = self.database.max_connections;
        config.acquire_timeout = Duration::from_secs(self.database.acquire_timeout_secs);
        config.statement_timeout = Duration::from_secs(self.database.statement_timeout_secs);
        Ok(config)
    }

    pub fn server_config(&self, bind_flag: Option<SocketAddr>, cors_flag: bool) -> ServerConfig {
        ServerConfig {
            bind_addr: bind_flag.unwrap_or(self.server.bind),
            cors_permissive: cors_flag || self.server.cors_permissive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_server_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind.port(), 3030);
        assert!(!config.server.cors_permissive);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.statement_timeout_secs, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn reads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/gigbook\"\nmax_connections = 12"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/gigbook"));
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.server, ServerSection::default());
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind = 3").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://file/gigbook".into());

        config
            .apply_env(env(&[
                ("DATABASE_URL", "postgres://env/gigbook"),
                ("GIGBOOK_BIND", "0.0.0.0:8080"),
            ]))
            .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("postgres://env/gigbook"));
        assert_eq!(config.server.bind.port(), 8080);
    }

    #[test]
    fn blank_database_url_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("DATABASE_URL", "  ")])).unwrap();
        assert!(config.database.url.is_none());
    }

    #[test]
    fn bad_bind_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("GIGBOOK_BIND", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { var: "GIGBOOK_BIND", .. }));
    }

    #[test]
    fn flags_win_over_config() {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://file/gigbook".into());
        config.database.statement_timeout_secs = 2;

        let db = config
            .database_config(Some("postgres://flag/gigbook".into()))
            .unwrap();
        assert_eq!(db.url, "postgres://flag/gigbook");
        assert_eq!(db.statement_timeout, Duration::from_secs(2));

        let bind: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let server = config.server_config(Some(bind), true);
        assert_eq!(server.bind_addr, bind);
        assert!(server.cors_permissive);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = AppConfig::default().database_config(None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }
}
