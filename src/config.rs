// Configuration module
// Layered loading: built-in defaults -> optional config file -> environment -> CLI overrides

use serde::Deserialize;
use std::net::SocketAddr;

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "isoserve";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Static serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Root directory under which all request paths are resolved
    pub root: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

/// Command-line overrides applied on top of file/env configuration
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<String>,
}

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; defaults cover every key, so a bare
    /// `isoserve --dir site` works with nothing on disk.
    pub fn load_from(config_path: &str, overrides: &Overrides) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("serve.root", ".")?
            .set_default(
                "serve.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("logging.access_log", true)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("ISOSERVE"))
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("serve.root", overrides.root.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
