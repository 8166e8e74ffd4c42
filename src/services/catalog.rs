//! Catalog service: listing, filtering and adding books

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookRecord, NewBook},
    repository::{BookFilter, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books matching the listing filters, for display.
    ///
    /// Documents that fail validation are logged and left out of the page.
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<BookRecord>> {
        let filter = BookFilter::from_query(query);
        let documents = self.repository.books.find(&filter).await?;

        Ok(documents
            .iter()
            .filter_map(|document| match BookRecord::from_document(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed book {:?}: {}",
                        document.get("_id"),
                        e
                    );
                    None
                }
            })
            .collect())
    }

    /// Every known genre, for the listing filter control
    pub async fn list_genres(&self) -> AppResult<Vec<String>> {
        self.repository.books.distinct_genres().await
    }

    /// Every stored book in API shape.
    ///
    /// A single invalid document fails the whole listing.
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let documents = self.repository.books.find(&BookFilter::all()).await?;

        documents
            .iter()
            .map(|document| {
                BookRecord::from_document(document)
                    .and_then(Book::try_from)
                    .map_err(AppError::InvalidRecord)
            })
            .collect()
    }

    /// Insert a book and return it with its assigned identifier
    pub async fn add_book(&self, book: NewBook) -> AppResult<BookRecord> {
        let id = self.repository.books.insert(book.to_document()).await?;
        tracing::info!("Book \"{}\" added with id {}", book.title, id);

        Ok(BookRecord {
            id: Some(id.into()),
            title: book.title,
            author: book.author,
            status: book.status,
            genre: book.genre,
        })
    }

    /// Insert a book submitted through the JSON API
    pub async fn create_book(&self, book: NewBook) -> AppResult<Book> {
        let record = self.add_book(book).await?;
        Book::try_from(record).map_err(AppError::from)
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
