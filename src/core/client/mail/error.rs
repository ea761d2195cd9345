use aws_sdk_sesv2::error::{BuildError, SdkError};
use aws_sdk_sesv2::operation::send_email::SendEmailError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to send email: {0}")]
    SendEmailError(#[from] SdkError<SendEmailError>),

    #[error("Failed to build email: {0}")]
    BuildError(#[from] BuildError),
}
