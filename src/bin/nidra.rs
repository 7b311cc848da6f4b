//! Thin composition layer wiring the cognitive runtime core into a
//! runnable demo process. The logic lives in the `nidra-*` crates;
//! this is just how they get started.

mod config;
mod restartable;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nidra_core::{CharsPerTokenEstimator, Message, Role};
use nidra_daemon::prana::{NoopScanHandler, Supervisor};
use nidra_marga::turiya::extract_context;
use nidra_marga::{decide, MargaDecideRequest};
use nidra_mesh::ActorSystem;
use nidra_triguna::{Observation, TrigunaMonitor};

use config::RuntimeConfig;
use restartable::{new_in_memory_daemon, DaemonHandle};

#[derive(Parser)]
#[command(name = "nidra", about = "Cognitive runtime core for an autonomous coding agent", version)]
struct Cli {
    /// Path to a TOML config file; missing or unparsable falls back to defaults.
    #[arg(long, global = true, default_value = "nidra.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the daemon, its supervisor, and a small actor mesh, then idle.
    Run,
    /// Run a single Marga routing decision against a message and print it.
    Decide { message: String },
    /// Feed a synthetic observation through the Triguna monitor and print the resulting state.
    Observe {
        #[arg(long, default_value_t = 0.1)]
        error_rate: f64,
        #[arg(long, default_value_t = 0.5)]
        success_rate: f64,
    },
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let runtime_config = RuntimeConfig::load(&cli.config);

    match cli.command {
        Command::Run => run(runtime_config).await,
        Command::Decide { message } => decide_once(&message),
        Command::Observe { error_rate, success_rate } => observe_once(runtime_config, error_rate, success_rate),
    }
}

async fn run(runtime_config: RuntimeConfig) -> anyhow::Result<()> {
    let mesh = ActorSystem::new(runtime_config.mesh.clone());

    let factory_config = runtime_config.nidra.clone();
    let factory: nidra_daemon::prana::DaemonFactory = Arc::new(move || {
        let config = factory_config.clone();
        Box::pin(async move {
            let daemon = new_in_memory_daemon(config, now_ms()).await.map_err(|e| e.to_string())?;
            daemon.start();
            Ok(Arc::new(DaemonHandle(daemon)) as Arc<dyn nidra_daemon::prana::Restartable>)
        })
    });

    let supervisor = Supervisor::new(runtime_config.prana.clone(), factory, Arc::new(NoopScanHandler), None);
    supervisor.start(now_ms()).await.map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(health = ?supervisor.health(), "nidra runtime started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    mesh.shutdown(std::time::Duration::from_secs(5)).await;
    supervisor.stop(now_ms()).await;
    Ok(())
}

fn decide_once(message: &str) -> anyhow::Result<()> {
    let request = MargaDecideRequest::new(message);
    let decision = decide(&request);
    println!("{}", serde_json::to_string_pretty(&decision)?);

    let messages = vec![Message::new("1", Role::User, 0).with_text(message)];
    let context = extract_context(&messages, None, &[], messages.len());
    tracing::debug!(?context, "turiya context extracted from the same message");
    Ok(())
}

fn observe_once(runtime_config: RuntimeConfig, error_rate: f64, success_rate: f64) -> anyhow::Result<()> {
    let mut monitor = TrigunaMonitor::new(runtime_config.triguna);
    let observation = Observation { error_rate, success_rate, ..Observation::default() };
    let events = monitor.update(&observation, now_ms());

    println!("dominant guna: {:?}", monitor.dominant());
    println!("simplex state: {:?}", monitor.guna_state());
    for event in events {
        println!("event: {event:?}");
    }

    let estimator = CharsPerTokenEstimator::new(8_000);
    let history = vec![Message::new("1", Role::User, 0).with_text("hello")];
    let compacted = nidra_compactor::compact(&history, &estimator, &nidra_compactor::CompactorConfig::default());
    println!("compacted history length: {}", compacted.len());
    Ok(())
}
