// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError, extractors::AppJson, models::teacher::LoginRequest, store::TeacherStore,
};

/// Lists teacher names (no passwords).
pub async fn list_teachers(State(teachers): State<Arc<TeacherStore>>) -> impl IntoResponse {
    Json(teachers.list_names().await)
}

/// Authenticates a teacher.
///
/// The name is matched ignoring case and surrounding whitespace. On success
/// the name is returned as stored, for the admin client to remember.
pub async fn login(
    State(teachers): State<Arc<TeacherStore>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lehrer = teachers
        .authenticate(&payload.lehrer, &payload.password)
        .await
        .inspect_err(|_| tracing::warn!("Failed login for '{}'", payload.lehrer))?;

    Ok(Json(json!({ "lehrer": lehrer })))
}
