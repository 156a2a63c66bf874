//! CLI command implementations
//!
//! Boot sequence for `start`:
//! 1. Configuration load
//! 2. Store open (key map rebuild + corruption check)
//! 3. Explicit wiring: store -> repository -> service -> HTTP state
//! 4. HTTP activation

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{HttpServer, HttpServerConfig, MetricsState};
use crate::metrics::{MetricsRepository, MetricsService};
use crate::observability::Logger;
use crate::store::MetricsStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// HTTP server settings (optional, all fields default)
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./hitstore-data".to_string(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }
}

fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join("data").exists()
}

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Init { config } => init(&config),
        Command::Start { config, port } => start(&config, port),
    }
}

/// Initialize the data directory layout.
///
/// Writes a default config file if none exists at the given path.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        let content = serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::config_error(format!("failed to render config: {}", e)))?;
        fs::write(config_path, content)
            .map_err(|e| CliError::config_error(format!("failed to write config: {}", e)))?;
        config
    };

    let data_dir = config.data_path();
    if is_initialized(data_dir) {
        return Err(CliError::already_initialized());
    }

    fs::create_dir_all(data_dir.join("data")).map_err(|e| {
        CliError::config_error(format!(
            "failed to create directory {:?}: {}",
            data_dir.join("data"),
            e
        ))
    })?;

    println!("{}", json!({"initialized": true, "data_dir": config.data_dir}));

    Ok(())
}

/// Start the hitstore HTTP server.
pub fn start(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let data_dir = config.data_path();

    if !is_initialized(data_dir) {
        return Err(CliError::not_initialized());
    }

    // Open the store; a corrupt record file refuses to boot
    let store = MetricsStore::open(data_dir)
        .map_err(|e| CliError::boot_failed(format!("failed to open store: {}", e)))?;

    Logger::info(
        "STORE_OPENED",
        &[
            ("data_dir", &config.data_dir),
            ("records", &store.len().to_string()),
        ],
    );

    // Explicit wiring, leaf-first
    let repository = MetricsRepository::new(Arc::new(store));
    let service = MetricsService::new(repository);
    let state = Arc::new(MetricsState::new(service));

    let mut http_config = config.http.clone();
    if let Some(port) = port_override {
        http_config.port = port;
    }
    let server = HttpServer::new(http_config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_load_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hitstore.json");
        fs::write(&path, r#"{"data_dir": "/tmp/hits"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, "/tmp/hits");
        assert_eq!(config.http.port, 8080);
    }

    #[test]
    fn test_config_rejects_empty_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hitstore.json");
        fs::write(&path, r#"{"data_dir": ""}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_config_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hitstore.json");
        fs::write(&path, "not json").unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_init_creates_layout_and_default_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("hitstore.json");
        let data_dir = dir.path().join("hits-data");
        fs::write(
            &config_path,
            json!({"data_dir": data_dir.to_str().unwrap()}).to_string(),
        )
        .unwrap();

        init(&config_path).unwrap();
        assert!(data_dir.join("data").exists());

        // Second init fails
        assert!(init(&config_path).is_err());
    }
}
