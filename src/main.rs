use annotation_orchestrator::cli::{Cli, Commands, RunCmd};
use annotation_orchestrator::core::config::Config;
use annotation_orchestrator::types::queue::WorkerKind;
use annotation_orchestrator::utils::logging::init_logging;
use annotation_orchestrator::worker::WorkerController;
use annotation_orchestrator::{OrchestratorError, OrchestratorResult};
use clap::Parser as _;
use dotenvy::dotenv;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting annotation orchestrator");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            if let Err(e) = run_orchestrator(run_command).await {
                error!(
                    error = %e,
                    error_chain = ?e,
                    "Orchestrator service failed"
                );
                panic!("Orchestrator service failed: {}", e);
            }
        }
    }
}

async fn run_orchestrator(run_cmd: &RunCmd) -> OrchestratorResult<()> {
    let config = Arc::new(Config::setup(run_cmd).await?);
    debug!("Configuration initialized");

    let kinds = run_cmd
        .workers
        .iter()
        .map(|name| {
            WorkerKind::from_str(name)
                .map_err(|_| OrchestratorError::ConfigError(format!("Unknown worker kind: {name}")))
        })
        .collect::<OrchestratorResult<Vec<_>>>()?;

    let controller = WorkerController::new(config, kinds, CancellationToken::new());
    let runner = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.run().await })
    };

    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
    info!("Shutdown signal received");

    controller.shutdown();
    runner.await??;

    info!("Orchestrator service shut down");
    Ok(())
}
