pub mod consumer;

pub use consumer::ConsumptionError;

use crate::core::client::archive::ArchiveError;
use crate::core::client::database::DatabaseError;
use crate::core::client::mail::MailError;
use crate::core::client::profile::ProfileError;
use crate::core::client::pubsub::PubSubError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use thiserror::Error;

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Error types for the orchestrator
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] ArchiveError),

    #[error("PubSub error: {0}")]
    PubSubError(#[from] PubSubError),

    #[error("Mail error: {0}")]
    MailError(#[from] MailError),

    #[error("Profile error: {0}")]
    ProfileError(#[from] ProfileError),

    #[error("Consumption error: {0}")]
    ConsumptionError(#[from] ConsumptionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Worker error
    #[error("Worker error: {0}")]
    WorkerError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}
