// src/common/extract.rs

//! Drop-in replacements for axum's `Json`, `Path` and `Query` extractors whose
//! rejections are turned into [`AppError::BadRequest`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::common::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
