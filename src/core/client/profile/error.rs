use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("No profile found for user {0}")]
    ProfileNotFound(String),

    #[error("MongoDB error: {0}")]
    MongoError(#[from] mongodb::error::Error),
}
