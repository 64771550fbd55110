#[macro_use]
extern crate tracing;

mod app_config;
mod args;

pub use app_config::get_config_dir;
pub use args::Args;
use color_eyre::Result;
use eyre::eyre;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::PathBuf,
};

pub const HEALTH_PATH: &str = "/healthz";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub listen_address: SocketAddr,
    pub metrics_path: String,
    pub radmin_binary: PathBuf,
    pub socket_file: PathBuf,
    #[serde(default)]
    pub home_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands_file: Option<PathBuf>,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("listen_address".to_string(), self.listen_address.to_string().into());
        cache.insert("metrics_path".to_string(), self.metrics_path.clone().into());
        cache.insert(
            "radmin_binary".to_string(),
            self.radmin_binary.display().to_string().into(),
        );
        cache.insert("socket_file".to_string(), self.socket_file.display().to_string().into());
        cache.insert("home_servers".to_string(), self.home_servers.clone().into());
        if let Some(commands_file) = &self.commands_file {
            cache.insert("commands_file".to_string(), commands_file.display().to_string().into());
        }
        Ok(cache)
    }
}

impl Config {
    /// Layers, lowest precedence first: built-in defaults, `<config dir>/config.yaml`,
    /// the `--config` file, then command-line arguments and their env vars.
    pub fn new(args: &Args) -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder().add_source(Config::default());

        builder = builder.add_source(
            config::File::from(config_dir.join("config.yaml"))
                .format(config::FileFormat::Yaml)
                .required(false),
        );

        if let Some(path) = &args.config {
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(config::File::from(path.as_path()).format(config::FileFormat::Yaml));
        }

        builder = builder.add_source(args.clone());

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.metrics_path.starts_with('/') {
            return Err(eyre!("metrics_path must start with '/', got {:?}", self.metrics_path));
        }
        if self.metrics_path == HEALTH_PATH {
            return Err(eyre!("metrics_path must not be {HEALTH_PATH}"));
        }
        if self.radmin_binary.as_os_str().is_empty() {
            return Err(eyre!("radmin_binary must not be empty"));
        }
        if self.home_servers.iter().all(|entry| entry.is_empty()) {
            warn!("No home servers configured, scrapes will not run radmin");
        }
        Ok(())
    }
}
