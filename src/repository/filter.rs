//! Translation of listing filters into a store filter expression.

use bson::{doc, Bson, Document};

use crate::models::book::BookQuery;

/// Conjunction of the optional listing constraints.
///
/// Every supplied constraint must hold; omitted ones match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    search: Option<String>,
    status: Option<String>,
    genre: Option<String>,
}

/// Empty query-string values mean "no constraint"
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl BookFilter {
    pub fn from_query(query: &BookQuery) -> Self {
        Self {
            search: non_empty(&query.search),
            status: non_empty(&query.status),
            genre: non_empty(&query.genre),
        }
    }

    /// Filter that matches every book
    pub fn all() -> Self {
        Self::default()
    }

    /// Store query document.
    ///
    /// The search text is escaped, so it matches as a literal substring
    /// rather than as a user-supplied regular expression.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(ref search) = self.search {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(search), "$options": "i" },
            );
        }
        if let Some(ref status) = self.status {
            filter.insert("status", status.as_str());
        }
        if let Some(ref genre) = self.genre {
            filter.insert("genre", genre.as_str());
        }
        filter
    }

    /// Evaluate the filter against a document without going to the store
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(ref search) = self.search {
            match document.get("title") {
                Some(Bson::String(title)) => {
                    if !title.to_lowercase().contains(&search.to_lowercase()) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        field_equals(document, "status", self.status.as_deref())
            && field_equals(document, "genre", self.genre.as_deref())
    }
}

fn field_equals(document: &Document, field: &str, expected: Option<&str>) -> bool {
    match expected {
        None => true,
        Some(expected) => matches!(document.get(field), Some(Bson::String(v)) if v == expected),
    }
}
