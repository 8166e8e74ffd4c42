//! Server-rendered web pages, mounted at the root path

pub mod auth;
pub mod books;
pub mod flash;
pub mod views;

use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    response::{Html, IntoResponse, Response},
};

use crate::error::AppError;

/// `AppError` rendered as an HTML page instead of a JSON body
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(e: AppError) -> Self {
        HtmlError(e)
    }
}

impl From<QueryRejection> for HtmlError {
    fn from(rejection: QueryRejection) -> Self {
        HtmlError(AppError::Validation(rejection.body_text()))
    }
}

impl From<FormRejection> for HtmlError {
    fn from(rejection: FormRejection) -> Self {
        HtmlError(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let (status, _, message) = self.0.classify();
        let title = status.canonical_reason().unwrap_or("Error");
        (status, Html(views::error(title, &message))).into_response()
    }
}

pub type WebResult<T> = Result<T, HtmlError>;
