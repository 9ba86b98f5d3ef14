use anyhow::Context;
use clap::{Parser, Subcommand};
use staffdesk_config::load as load_config;
use staffdesk_gateway::{create_router, GatewayState};
use staffdesk_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "staffdesk-server")]
#[command(about = "StaffDesk admin dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Migrate => run_migrations().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting StaffDesk backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone(), &config);

    if config.auth.admin_email.is_empty() || config.auth.admin_password.is_empty() {
        warn!("admin credentials not configured, skipping administrator bootstrap");
    } else {
        state
            .auth_service()
            .bootstrap_admin(&config.auth.admin_email, &config.auth.admin_password)
            .await
            .context("failed to bootstrap administrator credential")?;
    }

    let app = create_router(state).context("failed to build router")?;

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(staffdesk_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn run_migrations() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    BackendServices::initialise(&config)
        .await
        .context("failed to apply migrations")?;

    info!("database schema is up to date");
    Ok(())
}
