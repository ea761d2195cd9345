use mongodb::bson;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Item already exists: {0}")]
    ItemAlreadyExists(String),

    /// The guarded update found its precondition no longer true. Expected
    /// under concurrent writers; callers skip, they do not retry.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Failed to serialize document: {0}")]
    FailedToSerializeDocument(String),

    #[error("No update to apply: {0}")]
    NoUpdateFound(String),

    #[error("MongoDB error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerError(#[from] bson::ser::Error),

    #[error("BSON deserialization error: {0}")]
    BsonDeError(#[from] bson::de::Error),
}
