use aws_sdk_glacier::error::SdkError;
use aws_sdk_glacier::operation::delete_archive::DeleteArchiveError;
use aws_sdk_glacier::operation::get_job_output::GetJobOutputError;
use aws_sdk_glacier::operation::initiate_job::InitiateJobError;
use aws_sdk_glacier::operation::upload_archive::UploadArchiveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Expedited retrieval capacity is exhausted; callers may retry once on
    /// a slower tier
    #[error("Insufficient retrieval capacity: {0}")]
    InsufficientCapacity(String),

    /// The archive no longer exists. Benign on redelivered thaw messages.
    #[error("Archive not found: {0}")]
    ArchiveNotFound(String),

    #[error("Cold storage returned no archive id")]
    MissingArchiveId,

    #[error("Cold storage returned no retrieval job id")]
    MissingRetrievalId,

    #[error("Failed to upload archive: {0}")]
    UploadArchiveError(#[from] SdkError<UploadArchiveError>),

    #[error("Failed to initiate retrieval: {0}")]
    InitiateJobError(SdkError<InitiateJobError>),

    #[error("Failed to fetch retrieval output: {0}")]
    GetJobOutputError(#[from] SdkError<GetJobOutputError>),

    #[error("Failed to delete archive: {0}")]
    DeleteArchiveError(SdkError<DeleteArchiveError>),

    #[error("Failed to stream archive body: {0}")]
    BodyStreamError(String),
}

impl From<SdkError<InitiateJobError>> for ArchiveError {
    fn from(err: SdkError<InitiateJobError>) -> Self {
        match err.as_service_error() {
            Some(service_err) if service_err.is_insufficient_capacity_exception() => {
                ArchiveError::InsufficientCapacity(service_err.to_string())
            }
            _ => ArchiveError::InitiateJobError(err),
        }
    }
}

impl From<SdkError<DeleteArchiveError>> for ArchiveError {
    fn from(err: SdkError<DeleteArchiveError>) -> Self {
        match err.as_service_error() {
            Some(service_err) if service_err.is_resource_not_found_exception() => {
                ArchiveError::ArchiveNotFound(service_err.to_string())
            }
            _ => ArchiveError::DeleteArchiveError(err),
        }
    }
}
