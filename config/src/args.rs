use clap::Parser;
use std::{
    net::SocketAddr,
    path::PathBuf,
};

/// Prometheus exporter for FreeRADIUS home server statistics
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// YAML config file, layered over the defaults and the user config directory.
    #[arg(long, value_name = "FILE", env = "FREERADIUS_EXPORTER_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Address the HTTP server listens on.
    #[arg(long, value_name = "ADDR", env = "FREERADIUS_EXPORTER_LISTEN_ADDRESS")]
    pub listen_address: Option<SocketAddr>,

    /// HTTP path metrics are served on.
    #[arg(long, value_name = "PATH", env = "FREERADIUS_EXPORTER_METRICS_PATH")]
    pub metrics_path: Option<String>,

    /// Path to the radmin binary.
    #[arg(long, value_name = "FILE", env = "FREERADIUS_EXPORTER_RADMIN_BINARY")]
    pub radmin_binary: Option<PathBuf>,

    /// FreeRADIUS control socket passed to `radmin -f`.
    #[arg(long, value_name = "FILE", env = "FREERADIUS_EXPORTER_SOCKET_FILE")]
    pub socket_file: Option<PathBuf>,

    /// Home server to query as `address:port`. Repeat the flag or separate entries with commas.
    #[arg(
        long = "home-server",
        value_name = "ADDR:PORT",
        env = "FREERADIUS_EXPORTER_HOME_SERVERS",
        value_delimiter = ','
    )]
    pub home_servers: Vec<String>,

    /// Write the radmin commands to this file once and run `radmin -i <FILE>`
    /// instead of passing one `-e` per home server.
    #[arg(long, value_name = "FILE", env = "FREERADIUS_EXPORTER_COMMANDS_FILE")]
    pub commands_file: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(long, short, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(listen_address) = &self.listen_address {
                cache.insert("listen_address".to_string(), listen_address.to_string().into());
            }
            if let Some(metrics_path) = &self.metrics_path {
                cache.insert("metrics_path".to_string(), metrics_path.clone().into());
            }
            if let Some(radmin_binary) = &self.radmin_binary {
                cache.insert("radmin_binary".to_string(), radmin_binary.display().to_string().into());
            }
            if let Some(socket_file) = &self.socket_file {
                cache.insert("socket_file".to_string(), socket_file.display().to_string().into());
            }
            if !self.home_servers.is_empty() {
                cache.insert("home_servers".to_string(), self.home_servers.clone().into());
            }
            if let Some(commands_file) = &self.commands_file {
                cache.insert("commands_file".to_string(), commands_file.display().to_string().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "\
{version}

Authors: {author}

Config directory: {config_dir_path}",
        version = clap::crate_version!(),
    )
}
