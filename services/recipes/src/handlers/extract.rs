//! Extractor wrappers whose rejections render as the service's JSON error body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::RecipesServiceError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RecipesServiceError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RecipesServiceError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RecipesServiceError))]
pub struct AppQuery<T>(pub T);
