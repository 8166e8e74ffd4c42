//! Authentication pages.
//!
//! Only mounted when `auth.enabled` is set. Sign-in is not implemented yet, so
//! every route answers 501.

use axum::{routing::get, Router};

use crate::{error::AppError, AppState};

use super::WebResult;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login).post(login))
        .route("/auth/logout", get(logout))
}

async fn login() -> WebResult<()> {
    Err(AppError::NotImplemented("Sign-in is not available".to_string()).into())
}

async fn logout() -> WebResult<()> {
    Err(AppError::NotImplemented("Sign-out is not available".to_string()).into())
}
