use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CHAIN_ID: &str = "rollhub_100-1";
pub const DEFAULT_HOME: &str = ".rollhub";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const ENV_PREFIX: &str = "ROLLHUB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sled,
    Memory,
}

/// Node settings: defaults, then `config.toml`, then `ROLLHUB_*` variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub chain_id: String,
    pub home: PathBuf,
    pub store: StoreBackend,
    pub log_filter: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            home: PathBuf::from(DEFAULT_HOME),
            store: StoreBackend::Sled,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl NodeConfig {
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = NodeConfig::default();
        let mut builder = Config::builder()
            .set_default("chain_id", defaults.chain_id)?
            .set_default("home", defaults.home.to_string_lossy().into_owned())?
            .set_default("store", "sled")?
            .set_default("log_filter", defaults.log_filter)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Directory holding the durable store
    pub fn data_dir(&self) -> PathBuf {
        self.home.join("data")
    }
}
