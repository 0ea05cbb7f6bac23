use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::order::OrderArgs;

#[derive(Parser)]
#[command(name = "odk")]
#[command(about = "Order desk CLI", long_about = None)]
struct Cli {
    /// Base URL of the catalog/order API (beats ODK_API_URL and config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Layered config paths in merge order (base -> env -> local...)
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the product catalog
    Products,

    /// Fill the order form from flags and submit it
    PlaceOrder(OrderArgs),

    /// Run the field validators only (no network)
    Validate(OrderArgs),

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent when the file is absent; deployments inject env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Products => {
            let client = commands::client_config(cli.api_url.as_deref(), &cli.config_paths)?;
            commands::catalog::run_products(client).await?;
        }
        Commands::PlaceOrder(args) => {
            let client = commands::client_config(cli.api_url.as_deref(), &cli.config_paths)?;
            commands::order::run_place_order(client, args).await?;
        }
        Commands::Validate(args) => {
            commands::order::run_validate(&args)?;
        }
        Commands::ConfigHash { paths } => {
            let loaded = odk_config::load_layered_yaml(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
