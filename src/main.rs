use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedbricks::app::AppContext;
use feedbricks::cli::{commands, Cli, Commands};
use feedbricks::config::PipelineConfig;
use feedbricks::network::AdapterRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the rendered feed
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let load_config = || -> anyhow::Result<PipelineConfig> {
        let mut config = match &cli.config {
            Some(path) => PipelineConfig::load_from(path)?,
            None => PipelineConfig::load()?,
        };
        if let Some(workers) = cli.workers {
            config.workers = workers;
        }
        config.validate()?;
        Ok(config)
    };

    match cli.command {
        Commands::Fetch { json, seed } => {
            let config = load_config()?;
            let ctx = AppContext::new(&config)?;
            commands::fetch(&ctx, &config, json, seed).await?;
        }
        Commands::Urls => {
            let config = load_config()?;
            let ctx = AppContext::new(&config)?;
            commands::print_urls(&ctx.registry, &config);
        }
        Commands::Networks => {
            commands::list_networks(&AdapterRegistry::builtin());
        }
        Commands::Init => {
            commands::init(cli.config.as_deref())?;
        }
    }

    Ok(())
}
