//! Server-rendered HTML pages

use crate::models::book::{BookForm, BookQuery, BookRecord, DEFAULT_STATUS};

use super::flash::{Flash, FlashLevel};

/// Escape text for use in HTML content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Books</a> | <a href="/add">Add a book</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn alert(level: FlashLevel, message: &str) -> String {
    format!(
        "<div class=\"alert alert-{}\">{}</div>\n",
        level.as_class(),
        escape(message)
    )
}

/// Book listing with the filter controls pre-filled from `selected`
pub fn index(books: &[BookRecord], genres: &[String], selected: &BookQuery, flash: Option<&Flash>) -> String {
    let mut body = String::new();

    if let Some(flash) = flash {
        body.push_str(&alert(flash.level, &flash.message));
    }

    body.push_str("<h1>Library</h1>\n");
    body.push_str(&format!(
        concat!(
            "<form method=\"get\" action=\"/\">\n",
            "<input type=\"text\" name=\"search\" placeholder=\"Search title\" value=\"{}\">\n",
            "<input type=\"text\" name=\"status\" placeholder=\"Status\" value=\"{}\">\n",
            "<select name=\"genre\">\n<option value=\"\">All genres</option>\n"
        ),
        escape(selected.search.as_deref().unwrap_or_default()),
        escape(selected.status.as_deref().unwrap_or_default()),
    ));
    for genre in genres {
        let is_selected = selected.genre.as_deref() == Some(genre.as_str());
        body.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            escape(genre),
            if is_selected { " selected" } else { "" }
        ));
    }
    body.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");

    if books.is_empty() {
        body.push_str("<p class=\"empty\">No books found.</p>\n");
    } else {
        body.push_str(
            "<table class=\"books\">\n<thead><tr><th>Title</th><th>Author</th><th>Status</th><th>Genre</th></tr></thead>\n<tbody>\n",
        );
        for book in books {
            body.push_str(&format!(
                "<tr data-id=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&book.id_text().unwrap_or_default()),
                escape(&book.title),
                escape(&book.author),
                escape(&book.status),
                escape(book.genre.as_deref().unwrap_or_default()),
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Library", &body)
}

/// Add-book form, optionally showing an error and the values to correct
pub fn add_book(values: Option<&BookForm>, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(error) = error {
        body.push_str(&alert(FlashLevel::Danger, error));
    }

    let title = values.map(|v| v.title.as_str()).unwrap_or_default();
    let author = values.map(|v| v.author.as_str()).unwrap_or_default();
    let status = values
        .and_then(|v| v.status.as_deref())
        .unwrap_or(DEFAULT_STATUS);

    body.push_str(&format!(
        concat!(
            "<h1>Add a book</h1>\n",
            "<form method=\"post\" action=\"/add\">\n",
            "<label>Title <input type=\"text\" name=\"title\" value=\"{}\"></label>\n",
            "<label>Author <input type=\"text\" name=\"author\" value=\"{}\"></label>\n",
            "<label>Status <input type=\"text\" name=\"status\" value=\"{}\"></label>\n",
            "<button type=\"submit\">Add</button>\n",
            "</form>\n"
        ),
        escape(title),
        escape(author),
        escape(status),
    ));

    layout("Add a book", &body)
}

/// Error page carrying the HTTP status text and a message
pub fn error(status: &str, message: &str) -> String {
    let body = format!("<h1>{}</h1>\n<p>{}</p>\n", escape(status), escape(message));
    layout(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::BookId;
    use bson::oid::ObjectId;

    fn record(title: &str, genre: Option<&str>) -> BookRecord {
        BookRecord {
            id: Some(ObjectId::new().into()),
            title: title.into(),
            author: "Someone".into(),
            status: DEFAULT_STATUS.into(),
            genre: genre.map(Into::into),
        }
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn index_lists_books_and_selects_genre() {
        let books = vec![record("Dune", Some("scifi")), record("<Emma>", None)];
        let genres = vec!["classic".to_string(), "scifi".to_string()];
        let selected = BookQuery {
            search: Some("d\"x".into()),
            status: None,
            genre: Some("scifi".into()),
        };

        let html = index(&books, &genres, &selected, None);
        assert!(html.contains("<td>Dune</td>"));
        assert!(html.contains("<td>&lt;Emma&gt;</td>"));
        assert!(html.contains("<option value=\"scifi\" selected>scifi</option>"));
        assert!(html.contains("<option value=\"classic\">classic</option>"));
        assert!(html.contains("value=\"d&quot;x\""));
    }

    #[test]
    fn index_carries_text_ids() {
        let mut book = record("Dune", None);
        book.id = Some(BookId::Text("book-1".into()));
        let html = index(&[book], &[], &BookQuery::default(), None);
        assert!(html.contains("<tr data-id=\"book-1\">"));
    }

    #[test]
    fn index_shows_flash_and_empty_state() {
        let flash = Flash::success("Book \"Dune\" added!");
        let html = index(&[], &[], &BookQuery::default(), Some(&flash));
        assert!(html.contains("alert-success"));
        assert!(html.contains("Book &quot;Dune&quot; added!"));
        assert!(html.contains("No books found."));
    }

    #[test]
    fn add_form_preserves_submitted_values() {
        let form = BookForm {
            title: "  ".into(),
            author: "X".into(),
            status: Some("checked-out".into()),
        };
        let html = add_book(Some(&form), Some("Title and Author are required."));
        assert!(html.contains("alert-danger"));
        assert!(html.contains("name=\"author\" value=\"X\""));
        assert!(html.contains("name=\"title\" value=\"  \""));
        assert!(html.contains("value=\"checked-out\""));
    }

    #[test]
    fn empty_add_form_defaults_status() {
        let html = add_book(None, None);
        assert!(!html.contains("alert"));
        assert!(html.contains("name=\"status\" value=\"available\""));
    }
}
