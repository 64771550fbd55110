//! # FreeRADIUS Exporter
//!
//! Serves FreeRADIUS home server latency statistics to Prometheus.
//!
//! Each scrape of the metrics endpoint runs `radmin` against the daemon's control
//! socket with one `stats home_server <address> <port>` command per configured
//! home server and reports the `elapsed.*` buckets as
//! `freeradius_latency_<bucket>{address="<address>:<port>"}` counters.
//!
//! ## Usage
//!
//! ```bash
//! freeradius-exporter --socket-file=/var/run/radiusd/radiusd.sock \
//!                     --home-server=10.0.0.1:1812 \
//!                     --home-server=10.0.0.2:1812 \
//!                     --listen-address=0.0.0.0:9812
//! ```

#[macro_use]
extern crate tracing;

pub mod error;
pub mod logging;
pub mod router;

use eyre::{
    Context as _,
    Result,
};
use freeradius_exporter_collector::{
    InvocationMode,
    ProcessRunner,
    RadminCollector,
    RadminCommand,
};
use freeradius_exporter_config::Config;
pub use logging::{
    init_errors,
    init_logging,
};
use prometheus::Registry;
use router::create_router;
use tokio::net::TcpListener;

/// Registry holding a single [`RadminCollector`] built from `config`.
pub fn build_registry(config: &Config) -> Result<Registry> {
    let mode = match &config.commands_file {
        Some(path) => InvocationMode::CommandsFile(path.clone()),
        None => InvocationMode::Inline,
    };
    let command = RadminCommand::from_home_servers(&config.socket_file, &config.home_servers)?.with_mode(mode);
    info!(
        socket = %config.socket_file.display(),
        home_servers = ?command.endpoints().iter().map(ToString::to_string).collect::<Vec<_>>(),
        mode = ?command.mode(),
        "Configured radmin collector"
    );

    let collector = RadminCollector::new(command, ProcessRunner::new(&config.radmin_binary))?;
    let registry = Registry::new();
    registry
        .register(Box::new(collector))
        .context("Failed to register radmin collector")?;
    Ok(registry)
}

pub async fn start_server(config: &Config, registry: Registry) -> Result<()> {
    let app = create_router(&config.metrics_path, registry);
    let listener = TcpListener::bind(config.listen_address)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", config.listen_address))?;

    info!(address = %config.listen_address, path = %config.metrics_path, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
