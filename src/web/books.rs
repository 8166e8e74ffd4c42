//! Book listing and add-book pages

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{cookie::SignedCookieJar, WithRejection};

use crate::{
    models::book::{BookForm, BookQuery},
    AppState,
};

use super::{flash, views, HtmlError, WebResult};

const REQUIRED_FIELDS_MESSAGE: &str = "Title and Author are required.";

/// List books, narrowed by `search`, `status` and `genre`
pub async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Query(query), _): WithRejection<Query<BookQuery>, HtmlError>,
) -> WebResult<(SignedCookieJar, Html<String>)> {
    let catalog = &state.services.catalog;
    let (books, genres) = tokio::try_join!(catalog.search_books(&query), catalog.list_genres())?;

    let (jar, message) = flash::take(jar);
    let page = views::index(&books, &genres, &query, message.as_ref());
    Ok((jar, Html(page)))
}

/// Empty add-book form
pub async fn add_form() -> Html<String> {
    Html(views::add_book(None, None))
}

/// Add a book from the submitted form.
///
/// Blank title or author re-renders the form with the submitted values and
/// stores nothing.
pub async fn add_book(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, HtmlError>,
) -> WebResult<Response> {
    let Some(book) = form.to_new_book() else {
        return Ok(Html(views::add_book(Some(&form), Some(REQUIRED_FIELDS_MESSAGE))).into_response());
    };

    let record = state.services.catalog.add_book(book).await?;

    let jar = flash::push(
        jar,
        &flash::Flash::success(format!("Book \"{}\" added!", record.title)),
    );
    Ok((jar, Redirect::to("/")).into_response())
}
