// src/extractors.rs

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;

pub const TEACHER_HEADER: &str = "x-teacher";

#[derive(Debug, Deserialize)]
struct TeacherQuery {
    lehrer: Option<String>,
}

/// Optional teacher scope of a listing request.
///
/// Taken from the `lehrer` query parameter, falling back to the `x-teacher`
/// header. Blank values count as absent.
#[derive(Debug, Clone, Default)]
pub struct TeacherScope(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for TeacherScope {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<TeacherQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lehrer);

        let lehrer = from_query
            .or_else(|| {
                parts
                    .headers
                    .get(TEACHER_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .filter(|l| !l.trim().is_empty());

        Ok(TeacherScope(lehrer))
    }
}

/// JSON request body whose rejections are reported as [`AppError::BadRequest`],
/// so malformed bodies get the same `{"error": ...}` response as failed
/// validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}
