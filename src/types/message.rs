use crate::types::job::JobStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Empty payload")]
    EmptyPayload,
    #[error("Failed to decode message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid id in message: {0}")]
    InvalidId(#[from] uuid::Error),
}

/// Outer pub/sub envelope. The notification layer double-encodes payloads:
/// the envelope's `Message` field is itself a JSON-encoded string.
#[derive(Deserialize, Debug)]
struct PubSubEnvelope {
    #[serde(rename = "Message")]
    message: String,
}

/// Unwrap the pub/sub envelope when present. Messages the orchestrator
/// re-enqueues directly (deferred archive requests) arrive bare; both shapes
/// decode to the inner payload string.
pub fn unwrap_envelope(payload: &[u8]) -> String {
    let raw = String::from_utf8_lossy(payload).to_string();
    match serde_json::from_str::<PubSubEnvelope>(&raw) {
        Ok(envelope) => envelope.message,
        Err(_) => raw,
    }
}

/// Decode one typed message per topic, once, at the consumer boundary.
pub trait MessageParser: Sized {
    fn parse_message(payload: &[u8]) -> Result<Self, MessageError>;
}

/// A job submission as published by the web layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobRequestMessage {
    pub job_id: Uuid,
    pub user_id: String,
    pub input_file_name: String,
    pub s3_inputs_bucket: String,
    pub s3_key_input_file: String,
    /// Submission timestamp, epoch seconds
    pub st: i64,
    pub submit_time: String,
    pub job_status: JobStatus,
}

impl MessageParser for JobRequestMessage {
    fn parse_message(payload: &[u8]) -> Result<Self, MessageError> {
        let inner = unwrap_envelope(payload);
        if inner.trim().is_empty() {
            return Err(MessageError::EmptyPayload);
        }
        Ok(serde_json::from_str(&inner)?)
    }
}

/// Results-ready and archive-request payloads carry just the job id, as a
/// bare (possibly quoted) string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobIdMessage {
    pub job_id: Uuid,
}

impl MessageParser for JobIdMessage {
    fn parse_message(payload: &[u8]) -> Result<Self, MessageError> {
        let inner = unwrap_envelope(payload);
        let trimmed = inner.trim().trim_matches('"');
        if trimmed.is_empty() {
            return Err(MessageError::EmptyPayload);
        }
        Ok(Self { job_id: Uuid::parse_str(trimmed)? })
    }
}

/// Upgrade payloads carry the owner's user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdMessage {
    pub user_id: String,
}

impl MessageParser for UserIdMessage {
    fn parse_message(payload: &[u8]) -> Result<Self, MessageError> {
        let inner = unwrap_envelope(payload);
        let trimmed = inner.trim().trim_matches('"');
        if trimmed.is_empty() {
            return Err(MessageError::EmptyPayload);
        }
        Ok(Self { user_id: trimmed.to_string() })
    }
}

/// A cold-storage retrieval-completion notification. Field names follow the
/// archival backend's callback payload: `JobId` is the retrieval job,
/// `JobDescription` echoes the descriptive tag we set at initiation (the
/// annotation job id) and `ArchiveId` identifies the archive to free.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RetrievalCompleteMessage {
    #[serde(rename = "JobId")]
    pub retrieval_id: String,
    #[serde(rename = "JobDescription")]
    pub job_id: Uuid,
    #[serde(rename = "ArchiveId")]
    pub archive_id: String,
}

impl MessageParser for RetrievalCompleteMessage {
    fn parse_message(payload: &[u8]) -> Result<Self, MessageError> {
        let inner = unwrap_envelope(payload);
        if inner.trim().is_empty() {
            return Err(MessageError::EmptyPayload);
        }
        Ok(serde_json::from_str(&inner)?)
    }
}
