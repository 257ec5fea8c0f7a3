mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use overcast_cloud::ProviderRegistry;
use overcast_cloud_digitalocean::DigitalOceanProvider;
use overcast_core::InstanceController;
use overcast_registry::RegistryStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "overcast")]
#[command(about = "Spin up, import and manage clusters of machines over SSH", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, import and remove instances
    #[command(subcommand)]
    Instance(InstanceCommands),
    /// Manage clusters
    #[command(subcommand)]
    Cluster(ClusterCommands),
    /// Show version
    Version,
}

#[derive(Subcommand)]
pub(crate) enum InstanceCommands {
    /// Create a new instance on a hosting provider
    Create {
        /// Instance name
        name: Option<String>,
        /// Cluster to add the instance to
        #[arg(long)]
        cluster: Option<String>,
        /// Hosting provider (default: digitalocean)
        #[arg(long)]
        provider: Option<String>,
        /// Region (default: nyc2)
        #[arg(long)]
        region: Option<String>,
        /// Image (default: ubuntu-12-04-x64)
        #[arg(long)]
        image: Option<String>,
        /// Size (default: 512mb)
        #[arg(long)]
        size: Option<String>,
    },
    /// Import an existing machine
    Import {
        /// Instance name
        name: Option<String>,
        /// Cluster to add the instance to
        #[arg(long)]
        cluster: Option<String>,
        /// IP address of the machine
        #[arg(long)]
        ip: Option<String>,
        /// SSH user (default: root)
        #[arg(long)]
        user: Option<String>,
        /// SSH port (default: 22)
        #[arg(long = "ssh-port")]
        ssh_port: Option<String>,
        /// Path to the SSH private key (default: <config-dir>/keys/overcast.key)
        #[arg(long = "ssh-key")]
        ssh_key: Option<String>,
    },
    /// Remove an instance from the registry (the machine keeps running)
    Remove {
        /// Instance name
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ClusterCommands {
    /// Create an empty cluster
    Create {
        /// Cluster name
        name: Option<String>,
    },
}

/// Config directory, registry and providers for one invocation
pub(crate) struct Context {
    pub config_dir: PathBuf,
    pub store: Arc<RegistryStore>,
}

impl Context {
    fn resolve() -> anyhow::Result<Self> {
        let config_dir = overcast_config::find_config_dir()?;
        let store = Arc::new(RegistryStore::at_config_dir(&config_dir));
        tracing::debug!(registry = %store.path().display(), "Using registry");
        Ok(Self { config_dir, store })
    }

    fn controller(&self) -> InstanceController {
        let providers = ProviderRegistry::new().with(Arc::new(DigitalOceanProvider::from_env(
            self.store.clone(),
            &self.config_dir,
        )));
        InstanceController::new(self.store.clone(), providers, &self.config_dir)
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // version needs no config directory
        Commands::Version => {
            println!("overcast {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Instance(command) => {
            let context = Context::resolve()?;
            commands::instance::handle(&context.controller(), command).await?;
        }
        Commands::Cluster(command) => {
            let context = Context::resolve()?;
            commands::cluster::handle(&context, command).await?;
        }
    }

    Ok(())
}
