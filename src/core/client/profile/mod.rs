pub mod error;
pub mod mongodb;

use async_trait::async_trait;
pub use error::ProfileError;
use serde::{Deserialize, Serialize};

/// Subscription plans recognised by the retention policy.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Completed results are archived after the retention window
    #[serde(rename = "free_user")]
    FreeUser,
    /// Results stay in live storage indefinitely
    #[serde(rename = "premium_user")]
    PremiumUser,
}

/// A user profile as maintained by the accounts service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

/// Trait defining read access to the external accounts service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ProfileError>;
}
