use crate::core::client::pubsub::{PubSubClient, PubSubError};
use crate::types::params::TopicArgs;
use crate::types::queue::TopicType;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// SNS-backed notification relay
pub struct SNS {
    client: Arc<Client>,
    topic_template: String,
    cached_topic_arns: Mutex<HashMap<TopicType, String>>,
}

impl SNS {
    pub fn new(aws_config: &SdkConfig, args: &TopicArgs) -> Self {
        Self {
            client: Arc::new(Client::new(aws_config)),
            topic_template: args.topic_template.clone(),
            cached_topic_arns: Mutex::new(HashMap::new()),
        }
    }

    pub fn client(&self) -> &Client {
        self.client.as_ref()
    }

    fn topic_name(&self, topic: &TopicType) -> String {
        self.topic_template.replace("{}", &topic.to_string())
    }

    /// fetch_topic_arn_by_name - Resolve a topic name to its ARN by listing
    /// the account's topics
    async fn fetch_topic_arn_by_name(&self, topic_name: &str) -> Result<String, PubSubError> {
        let resp = self.client.list_topics().send().await?;

        for topic in resp.topics() {
            if let Some(arn) = topic.topic_arn() {
                if arn.rsplit(':').next() == Some(topic_name) {
                    return Ok(arn.to_string());
                }
            }
        }

        Err(PubSubError::TopicNotFound(topic_name.to_string()))
    }
}

#[async_trait]
impl PubSubClient for SNS {
    async fn publish(&self, topic: TopicType, message: &str) -> Result<(), PubSubError> {
        let topic_arn = self.get_topic_arn(topic).await?;
        self.client.publish().topic_arn(topic_arn).message(message).send().await?;
        Ok(())
    }

    async fn get_topic_arn(&self, topic: TopicType) -> Result<String, PubSubError> {
        {
            let cache = self.cached_topic_arns.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(arn) = cache.get(&topic) {
                return Ok(arn.clone());
            }
        }

        let arn = self.fetch_topic_arn_by_name(&self.topic_name(&topic)).await?;

        let mut cache = self.cached_topic_arns.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(topic, arn.clone());
        Ok(arn)
    }
}
