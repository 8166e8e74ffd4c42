//! MongoDB-backed book store

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Collection, Database};

use super::{BookFilter, BookStore};
use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Book collection reached through one shared driver client.
///
/// The driver pools connections internally; cloning the client or the
/// collection handle never opens a new pool.
#[derive(Clone)]
pub struct MongoBookStore {
    database: Database,
    books: Collection<Document>,
}

impl MongoBookStore {
    /// Build the client from the configured connection string.
    ///
    /// The driver connects lazily, so an unreachable server only shows up on
    /// the first request that touches it.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = ClientOptions::parse(&config.uri).await?;
        let database_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| config.name.clone());
        let client = Client::with_options(options)?;
        let database = client.database(&database_name);
        let books = database.collection::<Document>(&config.collection);

        tracing::info!(
            "Using MongoDB database '{}', collection '{}'",
            database_name,
            config.collection
        );

        Ok(Self { database, books })
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn find(&self, filter: &BookFilter) -> AppResult<Vec<Document>> {
        let cursor = self.books.find(filter.to_document(), None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let values = self.books.distinct("genre", None, None).await?;
        let mut genres: Vec<String> = values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(genre) => Some(genre),
                _ => None,
            })
            .collect();
        genres.sort();
        Ok(genres)
    }

    async fn insert(&self, document: Document) -> AppResult<ObjectId> {
        let result = self.books.insert_one(document, None).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::Internal(format!("Unexpected inserted id {}", result.inserted_id)))
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
