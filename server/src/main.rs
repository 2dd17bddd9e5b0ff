//! Wellness data service: HTTP server and CLI.
//!
//! Fetches country-level wellness metrics from several providers, merges them
//! under canonical country names, derives composite indicators, tags every
//! value with its provenance, and serves filtered views from a 24-hour cache.
//!
//! Usage:
//!   wellness-server serve --bind 0.0.0.0:8080
//!   wellness-server fetch --countries USA,Finland --metrics happiness_score
//!   wellness-server catalog
//!   wellness-server export --out wellness.csv
//!   wellness-server --config wellness.toml serve

mod app;
mod config;
mod export;
mod routes;

use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wellness_contracts::{
    cache::RunId,
    error::{WellnessError, WellnessResult},
    query::WellnessQuery,
};

use crate::{app::App, config::ServerConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Multi-source wellness statistics service.
#[derive(Parser)]
#[command(
    name = "wellness-server",
    about = "Multi-source wellness data pipeline",
    long_about = "Merges WHO, OECD, UN, World Bank and World Happiness figures per country,\n\
                  derives composite indicators, and marks every value real, estimated or mock."
)]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve {
        /// Overrides `bind` from the config file.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run one query and print the JSON response.
    Fetch {
        /// Comma-separated country names (raw or canonical).
        #[arg(long)]
        countries: Option<String>,
        /// Comma-separated metric keys.
        #[arg(long)]
        metrics: Option<String>,
        /// Print compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Print categories, units, and derived metric definitions.
    Catalog,
    /// Write every merged value as long-format CSV.
    Export {
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The server logs its lifecycle; one-shot commands stay quiet on stderr.
    // Set RUST_LOG=debug for per-stage detail.
    let default_filter = match cli.command {
        Command::Serve { .. } => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("wellness-server: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> WellnessResult<()> {
    let mut config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            serve(config).await
        }
        Command::Fetch {
            countries,
            metrics,
            compact,
        } => {
            let app = App::from_config(&config)?;
            let query = WellnessQuery::from_params(countries.as_deref(), metrics.as_deref(), None);
            let data = app.service.get_wellness_data(&query).await?;
            print_json(&data, compact)
        }
        Command::Catalog => {
            let app = App::from_config(&config)?;
            print_json(&routes::catalog(&app), false)
        }
        Command::Export { out } => {
            let app = App::from_config(&config)?;
            let pipeline = app.service.pipeline();
            let batches = pipeline.fetch_all(RunId::new()).await;
            let data = pipeline.enrich(batches)?;
            let rows = match out {
                Some(path) => {
                    let file = File::create(&path).map_err(|e| WellnessError::ConfigError {
                        reason: format!("cannot create '{}': {}", path.display(), e),
                    })?;
                    export::write_csv(&data, file)?
                }
                None => export::write_csv(&data, io::stdout().lock())?,
            };
            info!(rows, "export complete");
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> WellnessResult<()> {
    let addr = config.bind_addr()?;
    let app = Arc::new(App::from_config(&config)?);
    let router = routes::router(app);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WellnessError::ConfigError {
            reason: format!("cannot bind {}: {}", addr, e),
        })?;
    info!(%addr, "wellness service listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| WellnessError::PipelineFailed {
            stage: "serve".to_string(),
            reason: e.to_string(),
        })
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> WellnessResult<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .map_err(|e| WellnessError::PipelineFailed {
        stage: "render".to_string(),
        reason: e.to_string(),
    })?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered).map_err(|e| WellnessError::PipelineFailed {
        stage: "render".to_string(),
        reason: e.to_string(),
    })
}
