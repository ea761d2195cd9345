use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PubSubError {
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Failed to list topics: {0}")]
    ListTopicsError(#[from] SdkError<ListTopicsError>),

    #[error("Failed to publish message: {0}")]
    PublishError(#[from] SdkError<PublishError>),
}
