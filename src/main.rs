//! Salary Advisor command-line entry point.
//!
//! `run` processes a CSV file into reports on disk; `serve` exposes the
//! HTTP API.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salary_advisor::api::{AppState, create_router};
use salary_advisor::config::{AdvisorConfig, ConfigLoader};
use salary_advisor::ingest::RawTable;
use salary_advisor::market::{BenchmarkTable, MarketEstimator, OfflineMarketEstimator};
use salary_advisor::pipeline::SalaryAdvisor;
use salary_advisor::report::{render_salary_slip, render_summary, report_rows, write_spreadsheet};

/// Command-line arguments for salary-advisor
#[derive(Parser, Debug)]
#[command(name = "salary-advisor")]
#[command(about = "Salary recommendations with parity auditing")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process an employee CSV file and write reports
    Run {
        /// Employee table in CSV format
        #[arg(short, long)]
        input: PathBuf,

        /// Configuration directory; built-in defaults when omitted
        #[arg(short, long, env = "SALARY_ADVISOR_CONFIG")]
        config: Option<PathBuf>,

        /// Directory for generated reports
        #[arg(short, long, default_value = "reports")]
        out_dir: PathBuf,
    },
    /// Start the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "SALARY_ADVISOR_PORT")]
        port: u16,

        /// Configuration directory; built-in defaults when omitted
        #[arg(short, long, env = "SALARY_ADVISOR_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salary_advisor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Args::parse().command {
        Command::Run {
            input,
            config,
            out_dir,
        } => run(&input, config.as_deref(), &out_dir).await,
        Command::Serve { port, config } => serve(port, config.as_deref()).await,
    }
}

/// Loads configuration and picks the market source it implies.
fn load_config(dir: Option<&Path>) -> Result<(AdvisorConfig, Arc<dyn MarketEstimator>)> {
    let config = match dir {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("Failed to load configuration from {}", dir.display()))?
            .into_config(),
        None => AdvisorConfig::default(),
    };
    let estimator: Arc<dyn MarketEstimator> = if config.benchmarks().is_empty() {
        Arc::new(OfflineMarketEstimator::default())
    } else {
        Arc::new(BenchmarkTable::new(config.benchmarks().to_vec()))
    };
    Ok((config, estimator))
}

async fn run(input: &Path, config_dir: Option<&Path>, out_dir: &Path) -> Result<()> {
    let (config, estimator) = load_config(config_dir)?;
    let rows_per_page = config.settings().reports.rows_per_page;
    let advisor = SalaryAdvisor::new(Arc::new(config), estimator);

    let table = RawTable::from_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let report = tokio::task::spawn_blocking(move || advisor.run(&table))
        .await
        .context("Salary run did not complete")?
        .context("Salary run failed")?;

    for notice in &report.market_notices {
        println!("{}", notice);
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let rows = report_rows(&report.recommendations);

    let spreadsheet = out_dir.join("salary_report.csv");
    let file = fs::File::create(&spreadsheet)
        .with_context(|| format!("Failed to create {}", spreadsheet.display()))?;
    write_spreadsheet(&rows, file).context("Failed to write spreadsheet")?;

    let summary = out_dir.join("salary_report.txt");
    fs::write(&summary, render_summary(&rows, rows_per_page))
        .with_context(|| format!("Failed to write {}", summary.display()))?;

    if let (Some(first), Some(row)) = (report.recommendations.first(), rows.first()) {
        let slip = out_dir.join(format!("salary_slip_{}.txt", first.employee.id));
        fs::write(&slip, render_salary_slip(row))
            .with_context(|| format!("Failed to write {}", slip.display()))?;
    }

    info!(
        run_id = %report.run_id,
        employees = report.recommendations.len(),
        out_dir = %out_dir.display(),
        "Reports written"
    );
    Ok(())
}

async fn serve(port: u16, config_dir: Option<&Path>) -> Result<()> {
    let (config, estimator) = load_config(config_dir)?;
    let app = create_router(AppState::new(config, estimator));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await
        }
    }
}
