mod app;
mod config;
mod logging;
mod signals;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use crate::app::Modules;
use crate::config::{AppConfig, CliOverrides};

/// WebGIS Server - restaurants, accounts and map layers over PostGIS
#[derive(Parser)]
#[command(name = "webgis-server")]
#[command(about = "WebGIS Server - restaurants, accounts and map layers over PostGIS")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
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
    /// Apply database migrations and exit
    Migrate,
    /// Import every map layer's features from a GeoServer workspace
    Import {
        /// GeoServer workspace name
        workspace: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // defaults -> YAML (if provided) -> env (APP__*) -> CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
    })?;

    logging::init(&config.logging);

    if cli.print_config {
        println!("{}", config.to_redacted_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
        Commands::Migrate => {
            config.validate()?;
            let db = webgis_db::connect(&config.database).await?;
            app::migrate(&db).await
        }
        Commands::Import { workspace } => import(config, &workspace).await,
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    let addr = config.bind_addr()?;
    tracing::info!("WebGIS server starting");

    let db = Arc::new(webgis_db::connect(&config.database).await?);
    if config.database.auto_migrate {
        app::migrate(&db).await?;
    }

    let router = app::build_router(&config.server, Modules::new(&config, &db)?);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async {
        if let Err(e) = signals::wait_for_shutdown().await {
            tracing::error!(error = %e, "Shutdown signal handling failed");
        }
    };
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    match Arc::into_inner(db) {
        Some(db) => db.close().await.context("failed to close database pool")?,
        None => tracing::warn!("Database pool still in use at shutdown"),
    }
    tracing::info!("WebGIS server stopped");
    Ok(())
}

async fn import(config: AppConfig, workspace: &str) -> Result<()> {
    config.validate()?;
    let db = Arc::new(webgis_db::connect(&config.database).await?);
    if config.database.auto_migrate {
        app::migrate(&db).await?;
    }
    let modules = Modules::new(&config, &db)?;

    let report = modules.map_layers.import(workspace).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.failed() > 0 {
        tracing::warn!(failed = report.failed(), "Some layers failed to import");
    }
    Ok(())
}
