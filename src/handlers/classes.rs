// src/handlers/classes.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::{AppJson, TeacherScope},
    models::roster::{CreateClassRequest, UpdateClassRequest},
    store::RosterStore,
};

/// Lists classes, optionally only those of one teacher.
pub async fn list_classes(
    State(roster): State<Arc<RosterStore>>,
    TeacherScope(lehrer): TeacherScope,
) -> impl IntoResponse {
    Json(roster.list_classes(lehrer.as_deref()).await)
}

/// Creates a class. `(name, jahrgang)` must not exist yet.
pub async fn create_class(
    State(roster): State<Arc<RosterStore>>,
    AppJson(payload): AppJson<CreateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let name = payload.name.clone();
    let jahrgang = payload.jahrgang.clone();
    let classes = roster.create_class(payload).await?;
    tracing::info!("Created class {} ({})", name, jahrgang);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Class created", "classes": classes })),
    ))
}

/// Reassigns a class to another teacher.
pub async fn update_class(
    State(roster): State<Arc<RosterStore>>,
    Path((name, jahrgang)): Path<(String, String)>,
    AppJson(payload): AppJson<UpdateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    let klasse = roster
        .update_class_teacher(&name, &jahrgang, payload.lehrer)
        .await?;

    Ok(Json(json!({ "message": "Class updated", "klasse": klasse })))
}

/// Deletes a class. Students and results of the class are kept.
pub async fn delete_class(
    State(roster): State<Arc<RosterStore>>,
    Path((name, jahrgang)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    roster.delete_class(&name, &jahrgang).await?;
    tracing::info!("Deleted class {} ({})", name, jahrgang);

    Ok(StatusCode::NO_CONTENT)
}
