use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; `memory` selects the in-process store
    #[serde(default = "default_database_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Content directory holding uploaded photos
    #[serde(default = "default_content_dir")]
    pub content_dir: String,
    /// Request body cap for uploads, unlimited when unset
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite:data/employees.db?mode=rwc".to_string()
}

fn default_content_dir() -> String {
    "uploads".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            max_upload_bytes: None,
        }
    }
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url.eq_ignore_ascii_case("memory")
    }

    /// Filesystem path of a SQLite database, if the url names one
    pub fn sqlite_path(&self) -> Option<&str> {
        let rest = self.url.strip_prefix("sqlite:")?;
        let rest = rest.trim_start_matches("//");
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() || path.starts_with(":memory:") {
            None
        } else {
            Some(path)
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from_file()?;
        config.apply_overrides(|key| env::var(key).ok());
        config.ensure_directories()?;
        tracing::info!(
            "Storage config: content_dir={}, max_upload_bytes={:?}",
            config.storage.content_dir,
            config.storage.max_upload_bytes
        );
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from config.toml or conf.ini
    fn load_from_file() -> anyhow::Result<Self> {
        let config_paths = ["config.toml", "conf.ini", "data/config.toml", "data/conf.ini"];

        for path in config_paths {
            if Path::new(path).exists() {
                let content = fs::read_to_string(path)?;
                let config = Self::from_toml(&content)?;
                tracing::info!("Loaded configuration from {}", path);
                return Ok(config);
            }
        }

        tracing::info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// Apply overrides from `lookup`
    /// Format: EMP_CONF_<SECTION>_<KEY>, plus the conventional PORT
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("EMP_CONF_SERVER_HOST") {
            self.server.host = val;
        }
        for key in ["PORT", "EMP_CONF_SERVER_PORT"] {
            if let Some(port) = lookup(key).and_then(|v| v.parse().ok()) {
                self.server.port = port;
            }
        }

        if let Some(val) = lookup("EMP_CONF_DATABASE_URL") {
            if !val.trim().is_empty() {
                self.database.url = val;
            }
        }

        if let Some(val) = lookup("EMP_CONF_STORAGE_CONTENT_DIR") {
            if !val.trim().is_empty() {
                self.storage.content_dir = val;
            }
        }
        if let Some(val) = lookup("EMP_CONF_STORAGE_MAX_UPLOAD_BYTES") {
            self.storage.max_upload_bytes = val.parse().ok();
        }
    }

    /// Ensure required directories exist
    fn ensure_directories(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.database.sqlite_path().and_then(|p| Path::new(p).parent()) {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::create_dir_all(&self.storage.content_dir)?;

        Ok(())
    }
}
