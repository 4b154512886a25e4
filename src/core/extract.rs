//! Extractors whose rejections are answered with the `AppError` JSON body

use super::AppError;
use axum_macros::{FromRequest, FromRequestParts};

/// `axum::Json` with `{status, message}` rejections
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with `{status, message}` rejections
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `axum::extract::Path` with `{status, message}` rejections
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
