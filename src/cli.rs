// Command line entry points: run the HTTP service or seed demo inventories

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::{
    AppState,
    catalog::Catalog,
    config::Settings,
    routes,
    seed::{self, DEMO_TENANTS, SeedOptions},
};

#[derive(Parser, Debug)]
#[command(
    name = "autodealer",
    about = "Dealership inventory and financing service",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate synthetic inventories for demo dealerships
    Seed(SeedArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Override the configured listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    address: Option<String>,
    /// Override the configured inventory JSON file
    #[arg(long)]
    inventory: Option<String>,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Tenant to generate; repeat for several. Defaults to every demo dealership.
    #[arg(long = "tenant")]
    tenants: Vec<String>,
    /// Vehicles per tenant
    #[arg(long, default_value_t = 60)]
    count: usize,
    /// Base RNG seed; each tenant offsets it by its position
    #[arg(long, default_value_t = 2024)]
    seed: u64,
    /// Directory receiving one <tenant>.json per tenant
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args).await,
        Command::Seed(args) => run_seed(args),
    }
}

pub async fn serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Initializing dealership server...");

    let mut settings = Settings::new().context("Failed to load configuration")?;
    if let Some(address) = args.address {
        settings.server_address = address;
    }
    if let Some(inventory) = args.inventory {
        settings.inventory_path = Some(inventory);
    }
    tracing::info!("Configuration loaded successfully.");

    let catalog = match settings.inventory_path.as_deref() {
        Some(path) => Catalog::load_json(path)
            .with_context(|| format!("Failed to load inventory from {}", path))?,
        None => {
            tracing::warn!("No inventory_path configured, serving an empty catalog.");
            Catalog::default()
        }
    };
    tracing::info!(vehicles = catalog.len(), version = catalog.version(), "Catalog ready.");

    let addr: SocketAddr = settings
        .server_address
        .parse()
        .with_context(|| format!("Invalid server address format: {}", settings.server_address))?;

    let app_state = AppState::new(settings, catalog);
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

fn run_seed(args: SeedArgs) -> Result<()> {
    let tenants: Vec<String> = if args.tenants.is_empty() {
        DEMO_TENANTS.iter().map(|t| t.to_string()).collect()
    } else {
        args.tenants
    };

    for (offset, tenant) in tenants.into_iter().enumerate() {
        let options = SeedOptions {
            seed: args.seed.wrapping_add(offset as u64),
            count: args.count,
            tenant,
        };
        let records = seed::generate_inventory(&options);
        let path = args
            .out_dir
            .join(format!("{}.json", crate::catalog::slugify(&options.tenant)));
        seed::write_inventory(&path, &records)?;
        println!("{} -> {} ({} vehicles)", options.tenant, path.display(), records.len());
    }
    Ok(())
}
