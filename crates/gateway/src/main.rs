//! API Gateway - HTTP entry point and database CLI for the identity service.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gateway_lib::config::GatewayConfig;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "gateway")]
#[command(about = "Identity service: sign-up, header authentication, password rotation")]
struct Cli {
    /// Force debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "GATEWAY_HOST")]
        host: Option<String>,
        #[arg(long, env = "GATEWAY_PORT")]
        port: Option<u16>,
    },
    /// Manage database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
}

#[derive(Subcommand)]
enum MigrateCommand {
    /// Apply pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Show applied and pending migrations
    Status,
    /// Drop everything and reapply all migrations
    Fresh,
}

impl From<MigrateCommand> for MigrateAction {
    fn from(cmd: MigrateCommand) -> Self {
        match cmd {
            MigrateCommand::Up => MigrateAction::Up,
            MigrateCommand::Down => MigrateAction::Down,
            MigrateCommand::Status => MigrateAction::Status,
            MigrateCommand::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            gateway_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            user_service_lib::run_migrations(&config.identity.database, action.into()).await?;
        }
    }

    Ok(())
}
