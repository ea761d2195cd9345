use crate::core::client::archive::{ArchiveClient, ArchiveError, RetrievalTier};
use crate::types::params::ArchiveArgs;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_glacier::primitives::ByteStream;
use aws_sdk_glacier::types::JobParameters;
use aws_sdk_glacier::Client;
use bytes::Bytes;
use std::sync::Arc;

/// "-" means the vault owner is the account the credentials belong to.
const SELF_ACCOUNT: &str = "-";

const ARCHIVE_RETRIEVAL: &str = "archive-retrieval";

/// Glacier-backed cold storage client
#[derive(Clone, Debug)]
pub struct Glacier {
    client: Arc<Client>,
    vault_name: String,
}

impl Glacier {
    pub fn new(aws_config: &SdkConfig, args: &ArchiveArgs) -> Self {
        Self { client: Arc::new(Client::new(aws_config)), vault_name: args.vault_name.clone() }
    }
}

#[async_trait]
impl ArchiveClient for Glacier {
    async fn upload_archive(&self, data: Bytes) -> Result<String, ArchiveError> {
        let output = self
            .client
            .upload_archive()
            .account_id(SELF_ACCOUNT)
            .vault_name(&self.vault_name)
            .body(ByteStream::from(data))
            .send()
            .await?;

        output.archive_id().map(str::to_string).ok_or(ArchiveError::MissingArchiveId)
    }

    async fn initiate_retrieval(
        &self,
        archive_id: &str,
        description: &str,
        sns_topic_arn: &str,
        tier: RetrievalTier,
    ) -> Result<String, ArchiveError> {
        let parameters = JobParameters::builder()
            .r#type(ARCHIVE_RETRIEVAL)
            .archive_id(archive_id)
            .description(description)
            .sns_topic(sns_topic_arn)
            .tier(tier.to_string())
            .build();

        let output = self
            .client
            .initiate_job()
            .account_id(SELF_ACCOUNT)
            .vault_name(&self.vault_name)
            .job_parameters(parameters)
            .send()
            .await?;

        output.job_id().map(str::to_string).ok_or(ArchiveError::MissingRetrievalId)
    }

    async fn get_retrieval_output(&self, retrieval_id: &str) -> Result<Bytes, ArchiveError> {
        let output = self
            .client
            .get_job_output()
            .account_id(SELF_ACCOUNT)
            .vault_name(&self.vault_name)
            .job_id(retrieval_id)
            .send()
            .await?;

        let data = output.body.collect().await.map_err(|e| ArchiveError::BodyStreamError(e.to_string()))?;

        Ok(data.into_bytes())
    }

    async fn delete_archive(&self, archive_id: &str) -> Result<(), ArchiveError> {
        self.client
            .delete_archive()
            .account_id(SELF_ACCOUNT)
            .vault_name(&self.vault_name)
            .archive_id(archive_id)
            .send()
            .await?;
        Ok(())
    }
}
