use crate::core::client::storage::{StorageClient, StorageError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;

/// AWSS3 is a struct that represents an AWS S3 client.
#[derive(Clone, Debug)]
pub struct AWSS3 {
    client: Arc<Client>,
}

impl AWSS3 {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self { client: Arc::new(Client::new(aws_config)) }
    }
}

#[async_trait]
impl StorageClient for AWSS3 {
    /// Get the data from the bucket with the specified key.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let output = self.client.get_object().bucket(bucket).key(key).send().await?;

        let data = output.body.collect().await.map_err(|e| StorageError::ObjectStreamError(e.to_string()))?;

        Ok(data.into_bytes())
    }

    /// Put the data into the bucket with the specified key.
    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StorageError> {
        self.client.put_object().bucket(bucket).key(key).body(ByteStream::from(data)).send().await?;

        Ok(())
    }

    /// Delete the data from the bucket with the specified key.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        Ok(self.client.delete_object().bucket(bucket).key(key).send().await.map(|_| ())?)
    }
}
