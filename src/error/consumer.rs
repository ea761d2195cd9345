use crate::core::client::archive::ArchiveError;
use crate::core::client::database::DatabaseError;
use crate::core::client::mail::MailError;
use crate::core::client::profile::ProfileError;
use crate::core::client::pubsub::PubSubError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use crate::types::message::MessageError;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced while handling a single queue message. The consumer loop
/// logs these and leaves the message unacknowledged, so the queue's
/// visibility timeout redelivers it; nothing here is fatal to the worker.
#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Failed to acknowledge message: {0}")]
    FailedToAcknowledgeMessage(String),

    #[error("Failed to parse message: {0}")]
    MessageParse(#[from] MessageError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("PubSub error: {0}")]
    PubSub(#[from] PubSubError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// A message referenced a job the record store does not know. Indicates
    /// an upstream bug; the message redelivers until manually corrected.
    #[error("No job record found for job {0}")]
    MissingRecord(Uuid),

    #[error("Job {job_id} is missing expected field {field}")]
    MissingField { job_id: Uuid, field: &'static str },

    #[error("Annotator exited with {0}")]
    AnnotatorFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
