pub mod cli;
pub mod core;
pub mod providers;

use crate::core::CurrencyRateProvider;
use crate::core::config::AppConfig;
use crate::providers::MindicadorProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    List,
    /// Chart the `top` most expensive products; `None` uses the configured count.
    Chart {
        top: Option<usize>,
    },
    Rate,
    Session,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("exportrack starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = config.seed_catalog()?;
    let provider: Arc<dyn CurrencyRateProvider> =
        Arc::new(MindicadorProvider::from_config(&config.providers.mindicador)?);

    match command {
        AppCommand::List => cli::list::run(&catalog, provider, &config.currency).await,
        AppCommand::Chart { top } => cli::chart::run(&catalog, top.unwrap_or(config.chart.top)),
        AppCommand::Rate => cli::rate::run(provider.as_ref(), &config.currency).await,
        AppCommand::Session => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            let mut session = cli::session::Session::new(
                catalog,
                provider,
                config.currency.clone(),
                config.input_mode(),
                config.chart.top,
            );
            session.run(input, &mut out).await
        }
    }
}
