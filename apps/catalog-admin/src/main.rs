//! Catalog Admin
//!
//! One-shot maintenance commands against the storefront database: insert the
//! sample products, remove them again, or dump what is stored.

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::MongoConfig;
use domain_catalog::{CatalogService, MongoCatalogRepository};
use eyre::Result;
use tracing::info;

/// The storefront database; not configurable.
const DATABASE_NAME: &str = "Tienda";

#[derive(Parser)]
#[command(name = "catalog-admin")]
#[command(about = "Seed, clean and verify the storefront product catalog")]
struct Cli {
    /// MongoDB connection string (falls back to MONGO_URI / MONGODB_URL)
    #[arg(long)]
    mongo_uri: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Insert the five sample products
    Seed,

    /// Delete every product named like a sample product
    Clean,

    /// Print every stored product as pretty JSON
    Verify,
}

fn mongo_config(cli: &Cli) -> Result<MongoConfig> {
    let config = match &cli.mongo_uri {
        Some(uri) => MongoConfig::new(uri.clone()),
        None => MongoConfig::from_env()?,
    };
    Ok(config
        .with_database_name(DATABASE_NAME)
        .with_app_name(env!("CARGO_PKG_NAME")))
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = mongo_config(&cli)?;

    info!("Connecting to MongoDB at {}", config.redacted_url());
    let client = database::mongodb::connect_from_config_with_retry(&config, None).await?;
    let db = client.database(config.database());

    let service = CatalogService::new(MongoCatalogRepository::new(&db));

    let outcome = run(&service, cli.command).await;
    database::mongodb::shutdown(client).await;
    outcome
}

async fn run(service: &CatalogService<MongoCatalogRepository>, command: Commands) -> Result<()> {
    match command {
        Commands::Seed => {
            let inserted = service.seed_sample_products().await?;
            info!("{} products inserted", inserted);
        }

        Commands::Clean => {
            let deleted = service.clean_sample_products().await?;
            info!("{} products deleted", deleted);
        }

        Commands::Verify => {
            let products = service.list_products().await?;
            info!("Total products found: {}", products.len());
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
    }

    Ok(())
}
