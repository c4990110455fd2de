use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portal_sim::auth::Authenticator;
use portal_sim::config::{ConfigLoader, DEFAULT_LOG_FILTER};
use portal_sim::domain::catalog::ScenarioId;
use portal_sim::domain::order::OrderTemplate;
use portal_sim::metrics::PortalMetrics;
use portal_sim::notifications::TracingSink;
use portal_sim::presenter::{self, ActionKind};
use portal_sim::simulation::{sample_payload, RandomOutcome, UploadFile};
use portal_sim::Portal;

#[derive(Debug, Parser)]
#[command(name = "portal-sim", about = "Walk through the integration training portal in a terminal")]
struct Cli {
    /// TOML or JSON configuration file
    #[arg(long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Show only this scenario at the end (e.g. of-dispatch)
    #[arg(long)]
    scenario: Option<String>,

    /// Seed for simulated upload / API outcomes
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config decides the log filter, so loading it logs through a default one
    let config = tracing::subscriber::with_default(subscriber(log_filter(DEFAULT_LOG_FILTER)), || {
        ConfigLoader::from_env_and_file(cli.config.as_deref())
    })?;
    subscriber(log_filter(&config.logging.filter)).init();

    tracing::info!("🚀 Starting integration portal simulator");

    let authenticator = Authenticator::new(&config.auth);
    let session = authenticator.login(&config.auth.username, &config.auth.password).await?;
    tracing::info!(user = %session.username, "Session opened");

    let metrics = Arc::new(PortalMetrics::new()?);
    let seed = cli.seed.or(config.simulation.seed);
    let mut portal = Portal::new(
        &config.simulation,
        Arc::new(TracingSink),
        Box::new(RandomOutcome::from_seed(seed)),
        metrics.clone(),
    );

    // === Order lifecycle walk-through ===
    portal.select_scenario(ScenarioId::OfAcknowledgement);
    let first = portal.perform(&ActionKind::Create(OrderTemplate::SingleItem))?;
    let second = portal.perform(&ActionKind::Create(OrderTemplate::MultipleItems))?;
    portal.perform(&ActionKind::Acknowledge(first.clone()))?;
    portal.perform(&ActionKind::Dispatch(first.clone()))?;
    portal.perform(&ActionKind::Deliver(first.clone()))?;
    portal.perform(&ActionKind::RaiseRefund(first.clone()))?;
    portal.perform(&ActionKind::Cancel(second.clone()))?;

    // Rejected on purpose: cancelled orders cannot be acknowledged
    if let Err(err) = portal.perform(&ActionKind::Acknowledge(second)) {
        tracing::info!(error = %err, "Rejected as expected");
    }

    portal.select_scenario(ScenarioId::OcPostdispatch);
    portal.perform(&ActionKind::Create(OrderTemplate::Dispatched))?;

    // === Simulated integrations ===
    if let Err(err) = portal.upload(&UploadFile::new("products_batch_2.xlsx", 48_213)) {
        tracing::warn!(error = %err, "Upload not simulated");
    }
    if let Err(err) = portal.upload(&UploadFile::new("products.csv", 1_024)) {
        tracing::info!(error = %err, "Refused as expected");
    }
    portal.test_api(&sample_payload())?;

    // === Output ===
    match cli.scenario.as_deref() {
        Some(key) => println!("{}", presenter::present_by_key(key, portal.orders())),
        None => {
            for scenario in ScenarioId::ALL {
                println!("{}", presenter::present(scenario, portal.orders()));
            }
        }
    }

    if let Some(summary) = portal.summary() {
        println!("Module Summary: {} ({}%)", summary.module_title, summary.completion_percentage);
        println!("  {}", summary.completion_text());
        for metric in &summary.metrics {
            println!("  {:<32} {}", metric.label, metric.value);
        }
    }

    println!("\nIntegration Logs");
    for entry in portal.activity().entries() {
        println!(
            "  {} [{}] {:?} {} - {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.kind.label(),
            entry.status,
            entry.operation,
            entry.message
        );
    }

    println!("\n{}", metrics.render()?);
    tracing::info!(orders = portal.orders().len(), journal = portal.orders().journal().len(), "✅ Done");
    Ok(())
}

/// RUST_LOG wins over `fallback`.
fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

fn subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(fmt::layer().with_target(true)).with(filter)
}
