//! MongoDB implementations of the repository traits.

mod documents;
mod pet_repository;
mod user_repository;

pub use documents::*;
pub use pet_repository::*;
pub use user_repository::*;

use abrigo_core::{AbrigoError, AbrigoResult};
use abrigo_config::MongoConfig;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{bson::doc, Client, Database, IndexModel};
use tracing::info;

/// MongoDB duplicate key error code.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Shared handle to the application database.
#[derive(Clone, Debug)]
pub struct MongoDatabase {
    database: Database,
}

impl MongoDatabase {
    /// Connects to MongoDB using the given configuration.
    pub async fn connect(config: &MongoConfig) -> AbrigoResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| AbrigoError::Configuration(format!("Invalid MongoDB URI: {}", e)))?;
        options.max_pool_size = Some(config.max_pool_size);
        options.connect_timeout = Some(config.connect_timeout());
        options.app_name = Some("abrigo".to_string());

        let client = Client::with_options(options)
            .map_err(|e| AbrigoError::Database(format!("Failed to create MongoDB client: {}", e)))?;

        let database = client.database(&config.database);

        // Fail fast if the server is unreachable.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AbrigoError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!(database = %config.database, "Connected to MongoDB");

        Ok(Self { database })
    }

    /// Wraps an already-connected database handle.
    #[must_use]
    pub fn from_database(database: Database) -> Self {
        Self { database }
    }

    /// Returns the underlying database handle.
    #[must_use]
    pub fn inner(&self) -> &Database {
        &self.database
    }

    /// Creates the indexes the repositories rely on.
    pub async fn ensure_indexes(&self) -> AbrigoResult<()> {
        let users = self
            .database
            .collection::<UserDocument>(UserDocument::COLLECTION);

        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users
            .create_index(unique_email)
            .await
            .map_err(map_mongo_error)?;

        let location_2dsphere = IndexModel::builder()
            .keys(doc! { "address.location": "2dsphere" })
            .build();
        users
            .create_index(location_2dsphere)
            .await
            .map_err(map_mongo_error)?;

        let pets = self
            .database
            .collection::<PetDocument>(PetDocument::COLLECTION);
        let owner_index = IndexModel::builder().keys(doc! { "owner_id": 1 }).build();
        pets.create_index(owner_index)
            .await
            .map_err(map_mongo_error)?;

        info!("MongoDB indexes ensured");
        Ok(())
    }
}

/// Maps a MongoDB driver error to a domain error.
///
/// Duplicate key violations become `Conflict` so the REST layer can
/// answer 409 instead of 500.
pub(crate) fn map_mongo_error(err: mongodb::error::Error) -> AbrigoError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
        if write_error.code == DUPLICATE_KEY_CODE {
            return AbrigoError::Conflict("Duplicate key".to_string());
        }
    }

    // Batch inserts report duplicates through a different error kind, so
    // fall back to the server message.
    let message = err.to_string();
    if message.contains("E11000") {
        return AbrigoError::Conflict("Duplicate key".to_string());
    }

    AbrigoError::Database(message)
}
