use clap::Parser;
use color_eyre::Result;
use freeradius_exporter::{
    build_registry,
    init_errors,
    init_logging,
    start_server,
};
use freeradius_exporter_config::{
    Args,
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = Config::new(&args)?;
    config.validate()?;

    let registry = build_registry(&config)?;
    start_server(&config, registry).await
}
