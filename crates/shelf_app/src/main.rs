mod logging;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use shelf_engine::{load_config, Pipeline, ReqwestFetcher, ToggleSet};
use shelf_logging::{shelf_error, shelf_info, FacadeLog};

#[derive(Parser)]
#[command(name = "shelf", about = "Scrape a product catalog page and export it")]
struct Cli {
    /// Main YAML config file (missing means defaults)
    #[arg(short, long, default_value = "config/default_config.yaml")]
    config: PathBuf,
    /// Directory of YAML overlays merged on top of the main file
    #[arg(long, default_value = "config/yaml_config")]
    config_dir: PathBuf,
    /// Print the merged configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config, &cli.config_dir)
        .with_context(|| format!("loading configuration from {:?}", cli.config))?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::initialize(&config.logging);
    shelf_info!("Configuration loaded from {:?}", cli.config);

    let log = Arc::new(FacadeLog);
    let toggles = ToggleSet::from_overrides(&config.toggles, log.clone());
    let pipeline = Pipeline::new(
        config,
        Arc::new(ReqwestFetcher::default()),
        Arc::new(toggles),
        log,
    );

    let report = pipeline.run().await;
    if let Some(err) = &report.error {
        shelf_error!("Run failed: {}", err);
        bail!("{err}");
    }
    for line in report::summary_lines(&report) {
        println!("{line}");
    }
    Ok(())
}
