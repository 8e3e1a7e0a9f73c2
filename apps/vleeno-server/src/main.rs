use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use users::api::auth::{AllowAllVerifier, CredentialVerifier};
use users::api::rest::routes;
use users::domain::service::UsersService;
use users::infra::storage::migrations::Migrator;
use users::infra::storage::repo::SeaOrmUsersRepository;

mod config;
mod logging;

use config::AppConfig;

/// Vleeno user service
#[derive(Parser)]
#[command(name = "vleeno-server")]
#[command(about = "Vleeno user service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database URL (overrides config)
    #[arg(long)]
    database_url: Option<String>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::load_or_default(cli.config.as_deref())?;
    cfg.apply_cli_overrides(cli.port, cli.database_url.clone(), cli.verbose);

    if cli.print_config {
        print!("{}", cfg.to_yaml()?);
        return Ok(());
    }

    logging::init(&cfg.logging.level);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            info!("configuration OK");
            Ok(())
        }
        Commands::Run => run(cfg).await,
    }
}

async fn run(cfg: AppConfig) -> Result<()> {
    let db = Database::connect(&cfg.database.url)
        .await
        .with_context(|| format!("connecting to {}", cfg.database.url))?;
    Migrator::up(&db, None).await.context("running migrations")?;
    info!("database ready");

    let repo = Arc::new(SeaOrmUsersRepository::new(db));
    let service = Arc::new(UsersService::new(repo));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(AllowAllVerifier);

    let app = Router::new()
        .nest("/api/users", routes::router(service, verifier))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(10 * 1024));

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
