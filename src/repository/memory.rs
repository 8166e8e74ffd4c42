//! In-process book store, used by tests and for running without a database

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{BookFilter, BookStore};
use crate::error::AppResult;

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with documents, kept exactly as given
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn find(&self, filter: &BookFilter) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|document| filter.matches(document))
            .cloned()
            .collect())
    }

    async fn distinct_genres(&self) -> AppResult<Vec<String>> {
        let documents = self.documents.read().await;
        let mut genres: Vec<String> = documents
            .iter()
            .filter_map(|document| match document.get("genre") {
                Some(Bson::String(genre)) => Some(genre.clone()),
                _ => None,
            })
            .collect();
        genres.sort();
        genres.dedup();
        Ok(genres)
    }

    async fn insert(&self, mut document: Document) -> AppResult<ObjectId> {
        let id = ObjectId::new();
        document.insert("_id", id);
        self.documents.write().await.push(document);
        Ok(id)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::BookQuery;
    use bson::doc;

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let store = MemoryBookStore::new();
        let first = store.insert(doc! { "title": "Dune", "author": "Herbert" }).await.unwrap();
        let second = store.insert(doc! { "title": "Emma", "author": "Austen" }).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);

        let found = store.find(&BookFilter::all()).await.unwrap();
        assert_eq!(found[0].get_object_id("_id").unwrap(), first);
    }

    #[tokio::test]
    async fn find_applies_filter() {
        let store = MemoryBookStore::with_documents(vec![
            doc! { "title": "Dune", "author": "Herbert", "genre": "scifi" },
            doc! { "title": "Emma", "author": "Austen", "genre": "classic" },
        ]);
        let filter = BookFilter::from_query(&BookQuery {
            genre: Some("classic".into()),
            ..Default::default()
        });
        let found = store.find(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("title").unwrap(), "Emma");
    }

    #[tokio::test]
    async fn distinct_genres_skips_missing_and_duplicates() {
        let store = MemoryBookStore::with_documents(vec![
            doc! { "title": "Dune", "genre": "scifi" },
            doc! { "title": "Hyperion", "genre": "scifi" },
            doc! { "title": "Emma", "genre": "classic" },
            doc! { "title": "Untitled" },
        ]);
        assert_eq!(store.distinct_genres().await.unwrap(), vec!["classic", "scifi"]);
    }
}
