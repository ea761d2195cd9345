use crate::core::client::profile::{ProfileClient, ProfileError, UserProfile};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::Database;
use std::sync::Arc;

const USERS_COLLECTION: &str = "users";

/// Reads user profiles from the accounts collection. The accounts service
/// owns writes; this client only looks up plan and email.
pub struct MongoProfileClient {
    database: Arc<Database>,
}

impl MongoProfileClient {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ProfileClient for MongoProfileClient {
    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ProfileError> {
        self.database
            .collection::<UserProfile>(USERS_COLLECTION)
            .find_one(doc! { "user_id": user_id }, None)
            .await?
            .ok_or_else(|| ProfileError::ProfileNotFound(user_id.to_string()))
    }
}
