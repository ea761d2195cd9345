use crate::core::client::mail::{MailClient, MailError};
use crate::types::params::MailArgs;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use std::sync::Arc;

/// SES-backed email client
#[derive(Clone, Debug)]
pub struct SES {
    client: Arc<Client>,
    sender_address: String,
}

impl SES {
    pub fn new(aws_config: &SdkConfig, args: &MailArgs) -> Self {
        Self { client: Arc::new(Client::new(aws_config)), sender_address: args.sender_address.clone() }
    }
}

#[async_trait]
impl MailClient for SES {
    async fn send_email(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let destination = Destination::builder().to_addresses(recipient).build();

        let subject = Content::builder().data(subject).build()?;
        let text = Content::builder().data(body).build()?;
        let message = Message::builder().subject(subject).body(Body::builder().text(text).build()).build();

        self.client
            .send_email()
            .from_email_address(&self.sender_address)
            .destination(destination)
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        Ok(())
    }
}
