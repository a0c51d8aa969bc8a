use anyhow::{bail, Context};
use campusmap::{
    data::fetcher::{load_campus_data, CampusData, DatasetOutcome, FileFetcher, HttpFetcher},
    engine::headless::HeadlessFactory,
    CampusConfig, GeoJsonFetcher, MapSession,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus map tools")]
struct Cli {
    /// JSON configuration file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Directory holding the OSM exports (`osm_data/*.json`)
    #[arg(long, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Base URL the exports are served from
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the complete map style and print it as JSON
    Style {
        #[command(flatten)]
        data: DataArgs,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Load the three datasets and report what loaded
    Check {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Print the building table
    Buildings,
}

impl DataArgs {
    fn fetcher(&self) -> anyhow::Result<Box<dyn GeoJsonFetcher>> {
        Ok(match (&self.data_dir, &self.base_url) {
            (_, Some(url)) => Box::new(HttpFetcher::new(url)?),
            (Some(dir), None) => Box::new(FileFetcher::new(dir)),
            (None, None) => Box::new(FileFetcher::new(".")),
        })
    }

    async fn load(&self, config: &CampusConfig) -> anyhow::Result<CampusData> {
        let fetcher = self.fetcher()?;
        Ok(load_campus_data(fetcher.as_ref(), &config.data).await)
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<CampusConfig> {
    let config = match path {
        Some(path) => CampusConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => CampusConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Style { data, compact } => {
            let loaded = data.load(&config).await?;
            let mut factory = HeadlessFactory::new();
            let mut session = MapSession::create(&mut factory, &config, 1)?;
            let report = session.install(loaded)?;
            if let Some(message) = report.status_message() {
                log::warn!("{}", message);
            }

            let style = session.engine().style_snapshot().to_json()?;
            let output = if compact {
                serde_json::to_string(&style)?
            } else {
                serde_json::to_string_pretty(&style)?
            };
            println!("{}", output);
        }
        Command::Check { data } => {
            let report = data.load(&config).await?.report();
            for entry in &report.entries {
                match &entry.outcome {
                    DatasetOutcome::Loaded { features } => {
                        println!("{:<10} ok      {} features", entry.dataset, features)
                    }
                    DatasetOutcome::Failed { message } => {
                        println!("{:<10} FAILED  {}", entry.dataset, message)
                    }
                }
            }
            if let Some(message) = report.status_message() {
                bail!(message);
            }
        }
        Command::Buildings => {
            for building in &config.buildings {
                println!(
                    "{:<20} {:>10.4} {:>9.4}",
                    building.name, building.coordinates[0], building.coordinates[1]
                );
            }
        }
    }

    Ok(())
}
