use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to get queue url for queue {0}")]
    FailedToGetQueueUrl(String),

    #[error("Failed to resolve queue url: {0}")]
    GetQueueUrlError(#[from] SdkError<GetQueueUrlError>),

    #[error("Queue error: {0}")]
    ErrorFromQueueError(#[from] omniqueue::QueueError),
}
