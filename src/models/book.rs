//! Book model: stored document shape, API wire shape and the conversions between them.
//!
//! Documents in the `books` collection are schema-less, so every read goes through
//! [`BookRecord::from_document`], which checks required fields and reports the first
//! one that is missing. The store's native identifier is a BSON `ObjectId`; on the wire
//! it travels as its 24-character hex string. String `_id`s written by other clients are
//! carried through unchanged.

use bson::{doc, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

/// Status given to books created without one
pub const DEFAULT_STATUS: &str = "available";

/// Error raised when a record fails model validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` must be a string")]
    WrongType(&'static str),

    #[error("field `{0}` must not be empty")]
    Empty(&'static str),

    #[error("invalid book id `{0}`")]
    InvalidId(String),
}

/// Identifier of a stored book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookId {
    /// Assigned by the store on insert
    Object(ObjectId),
    /// String `_id` that is not an `ObjectId`
    Text(String),
}

impl BookId {
    /// Wire form: hex for store-assigned ids, the string itself otherwise
    pub fn to_wire(&self) -> String {
        match self {
            BookId::Object(oid) => oid.to_hex(),
            BookId::Text(text) => text.clone(),
        }
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        BookId::Object(oid)
    }
}

/// Book as stored in the document database
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub status: String,
    /// Not collected by the web form, so older documents may lack it
    pub genre: Option<String>,
}

impl BookRecord {
    /// Validate a raw document read back from the store
    pub fn from_document(document: &Document) -> Result<Self, ValidationError> {
        let id = match document.get("_id") {
            None | Some(Bson::Null) => None,
            Some(Bson::ObjectId(oid)) => Some(BookId::Object(*oid)),
            Some(Bson::String(s)) => Some(match ObjectId::parse_str(s) {
                Ok(oid) => BookId::Object(oid),
                Err(_) => BookId::Text(s.clone()),
            }),
            Some(_) => return Err(ValidationError::WrongType("_id")),
        };

        Ok(Self {
            id,
            title: required_text(document, "title")?,
            author: required_text(document, "author")?,
            status: optional_text(document, "status")?.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            genre: optional_text(document, "genre")?,
        })
    }

    /// Wire form of the identifier, if the record has been persisted
    pub fn id_text(&self) -> Option<String> {
        self.id.as_ref().map(BookId::to_wire)
    }
}

fn required_text(document: &Document, field: &'static str) -> Result<String, ValidationError> {
    match optional_text(document, field)? {
        None => Err(ValidationError::MissingField(field)),
        Some(value) if value.is_empty() => Err(ValidationError::Empty(field)),
        Some(value) => Ok(value),
    }
}

fn optional_text(document: &Document, field: &'static str) -> Result<Option<String>, ValidationError> {
    match document.get(field) {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ValidationError::WrongType(field)),
    }
}

/// Parse the wire form of a book id into the store's identifier type
pub fn parse_book_id(id: &str) -> Result<ObjectId, ValidationError> {
    ObjectId::parse_str(id).map_err(|_| ValidationError::InvalidId(id.to_string()))
}

/// Book as exposed by the JSON API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Store-assigned identifier, null until persisted
    pub id: Option<String>,
    pub title: String,
    pub author: String,
    /// Free text, "available" unless stated otherwise
    pub status: String,
    pub genre: String,
}

impl TryFrom<BookRecord> for Book {
    type Error = ValidationError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let id = record.id_text();
        let genre = record.genre.ok_or(ValidationError::MissingField("genre"))?;
        Ok(Self {
            id,
            title: record.title,
            author: record.author,
            status: record.status,
            genre,
        })
    }
}

/// Book about to be inserted; carries no identifier
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: String,
    pub genre: Option<String>,
}

impl NewBook {
    /// Insertable document. `_id` is left for the store to assign.
    pub fn to_document(&self) -> Document {
        let mut document = doc! {
            "title": self.title.as_str(),
            "author": self.author.as_str(),
            "status": self.status.as_str(),
        };
        if let Some(ref genre) = self.genre {
            document.insert("genre", genre.as_str());
        }
        document
    }
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// Create book request (JSON API)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "genre must not be empty"))]
    pub genre: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl From<CreateBook> for NewBook {
    fn from(data: CreateBook) -> Self {
        Self {
            title: data.title,
            author: data.author,
            status: data.status,
            genre: Some(data.genre),
        }
    }
}

/// Add book form fields (web)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub status: Option<String>,
}

impl BookForm {
    /// Trimmed title and author, or `None` when either ends up empty
    pub fn to_new_book(&self) -> Option<NewBook> {
        let title = self.title.trim();
        let author = self.author.trim();
        if title.is_empty() || author.is_empty() {
            return None;
        }
        let status = match self.status.as_deref() {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => default_status(),
        };
        Some(NewBook {
            title: title.to_string(),
            author: author.to_string(),
            status,
            genre: None,
        })
    }
}

/// Listing filters taken from the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Case-insensitive substring of the title
    pub search: Option<String>,
    /// Exact status
    pub status: Option<String>,
    /// Exact genre
    pub genre: Option<String>,
}
