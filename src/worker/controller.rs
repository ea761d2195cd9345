use crate::core::config::Config;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::queue::WorkerKind;
use crate::worker::archive::ArchiveWorker;
use crate::worker::compute::ComputeWorker;
use crate::worker::consumer::{ConsumerLoop, MessageHandler};
use crate::worker::notify::NotifyWorker;
use crate::worker::restore::RestoreWorker;
use crate::worker::thaw::ThawWorker;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, Instrument};

/// Build the message handler backing a worker kind.
fn build_handler(kind: WorkerKind, config: Arc<Config>) -> Arc<dyn MessageHandler> {
    match kind {
        WorkerKind::Compute => Arc::new(ComputeWorker::new(config)),
        WorkerKind::Notify => Arc::new(NotifyWorker::new(config)),
        WorkerKind::Archive => Arc::new(ArchiveWorker::new(config)),
        WorkerKind::Restore => Arc::new(RestoreWorker::new(config)),
        WorkerKind::Thaw => Arc::new(ThawWorker::new(config)),
    }
}

/// Spawns one consumer loop per selected worker kind and coordinates their
/// shutdown. Parallelism comes from running workers side by side; each
/// worker itself stays a single logical thread.
#[derive(Clone)]
pub struct WorkerController {
    config: Arc<Config>,
    kinds: Vec<WorkerKind>,
    cancellation_token: CancellationToken,
}

impl WorkerController {
    pub fn new(config: Arc<Config>, kinds: Vec<WorkerKind>, cancellation_token: CancellationToken) -> Self {
        Self { config, kinds, cancellation_token }
    }

    /// Run every selected worker until shutdown. Returns once all consumer
    /// loops have drained after a cancellation, or when a loop fails with an
    /// infrastructure error.
    pub async fn run(&self) -> OrchestratorResult<()> {
        if self.kinds.is_empty() {
            return Err(OrchestratorError::WorkerError("no workers selected".to_string()));
        }

        let mut worker_set = JoinSet::new();
        for kind in self.kinds.clone() {
            let config = self.config.clone();
            let worker_token = self.cancellation_token.child_token();
            worker_set.spawn(
                async move {
                    let handler = build_handler(kind, config.clone());
                    ConsumerLoop::new(config, handler, worker_token).run().await
                }
                .instrument(info_span!("worker", kind = %kind)),
            );
        }
        info!(count = self.kinds.len(), "Workers started");

        while let Some(result) = worker_set.join_next().await {
            result??;
        }
        Ok(())
    }

    /// Trigger a graceful shutdown: workers finish the message in flight and
    /// exit their loops.
    pub fn shutdown(&self) {
        info!("Signaling workers to shut down");
        self.cancellation_token.cancel();
    }
}
