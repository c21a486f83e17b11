use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const EXAMPLES_FILE: &str = "examples.jsonl";
pub const ANNOTATIONS_FILE: &str = "annotations.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the example and annotation files live. Each store is handed the
/// path it owns from here at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9847,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5439".to_string(),
                "http://localhost:4628".to_string(),
            ],
        }
    }
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn examples_path(&self) -> PathBuf {
        self.data_dir.join(EXAMPLES_FILE)
    }

    pub fn annotations_path(&self) -> PathBuf {
        self.data_dir.join(ANNOTATIONS_FILE)
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional config file and
    /// environment variables. A plain `PORT` variable wins over everything.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config", None, std::env::var("PORT").ok().as_deref())
    }

    /// `env` replaces the process environment when given.
    pub fn load_from(
        config_file: &str,
        env: Option<HashMap<String, String>>,
        port: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        config = config.add_source(config::File::with_name(config_file).required(false));

        // e.g. NOTATOR_SERVER__PORT, NOTATOR_STORAGE__DATA_DIR
        config = config.add_source(
            config::Environment::with_prefix("NOTATOR")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true)
                .source(env),
        );

        let config = config.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        app_config.apply_port_override(port)?;

        Ok(app_config)
    }

    /// Empty values are treated as unset.
    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        match port.map(str::trim) {
            Some(port) if !port.is_empty() => {
                self.server.port = port
                    .parse()
                    .with_context(|| format!("Invalid PORT value '{}'", port))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
