use std::io::ErrorKind;

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_POSTS_FILE: &str = "data/blog_posts.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
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

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the post array.
    #[serde(default = "default_posts_file")]
    pub posts_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { posts_file: default_posts_file() }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_posts_file() -> String { DEFAULT_POSTS_FILE.to_string() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build configuration from `SERVER_HOST`, `SERVER_PORT` and `POSTS_FILE` as
/// returned by `lookup`; unset or unparsable values use defaults.
pub fn from_lookup<F>(lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let host = lookup("SERVER_HOST").unwrap_or_else(default_host);
    let port = lookup("SERVER_PORT")
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let posts_file = lookup("POSTS_FILE").unwrap_or_else(default_posts_file);
    AppConfig {
        server: ServerConfig { host, port },
        storage: StorageConfig { posts_file },
    }
}

/// Read `path` if it exists, otherwise build from `lookup`.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_or_lookup<F>(path: &str, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    match std::fs::metadata(path) {
        Ok(_) => load_from_file(path).map_err(|e| anyhow!("invalid config file {path}: {e}")),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(from_lookup(lookup)),
        Err(e) => Err(anyhow!("cannot access config file {path}: {e}")),
    }
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to env vars when the
    /// file is absent, then normalize.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_lookup(&config_path(), |key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.posts_file.trim().is_empty() {
            return Err(anyhow!("storage.posts_file is empty; set it in config.toml or POSTS_FILE"));
        }
        Ok(())
    }
}
