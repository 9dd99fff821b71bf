use clap::{Parser, Subcommand};
use dotenv::dotenv;
use marketing_hub::market::config::ServerConfig;
use marketing_hub::market::demo;
use marketing_hub::market::seed::SeedLoader;
use marketing_hub::market::server;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the merchant and rider dashboards over HTTP
    Serve {
        /// Port to listen on (overrides HUB_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Seed file with riders and cities (overrides HUB_SEED_FILE)
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
    /// Walk one campaign through its lifecycle and print each step
    Demo {
        /// Seed file with riders and cities
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Campaign title to launch
        #[arg(short, long, default_value = "Sale")]
        campaign: String,

        /// Rider who accepts the campaign
        #[arg(short, long, default_value = "Ravi")]
        rider: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;

    match args.command {
        Commands::Serve { port, seed } => {
            if let Some(port) = port {
                config.port = port;
            }
            if seed.is_some() {
                config.seed_file = seed;
            }

            let seed = SeedLoader::new().load_or_default(config.seed_file.as_ref())?;
            log::info!(
                "Seeded {} riders and {} cities",
                seed.riders.len(),
                seed.cities.len()
            );

            server::serve(&config, &seed)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Commands::Demo {
            seed,
            campaign,
            rider,
        } => {
            let seed = SeedLoader::new().load_or_default(seed.or(config.seed_file))?;
            let steps = demo::run_scenario(&seed, &campaign, &rider).await?;

            for step in steps {
                println!("▶ {}", step.action);
                println!("{}", serde_json::to_string_pretty(&step.result)?);
            }
        }
    }

    Ok(())
}
