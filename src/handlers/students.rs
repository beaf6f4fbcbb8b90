// src/handlers/students.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    extractors::{AppJson, TeacherScope},
    models::roster::{
        CreateStudentRequest, MoveStudentsRequest, StudentFilter, UpdateStudentRequest,
    },
    store::RosterStore,
};

/// Lists students filtered by `klasse`, `jahrgang` and/or `lehrer`.
pub async fn list_students(
    State(roster): State<Arc<RosterStore>>,
    TeacherScope(lehrer): TeacherScope,
    Query(mut filter): Query<StudentFilter>,
) -> impl IntoResponse {
    if filter.lehrer.is_none() {
        filter.lehrer = lehrer;
    }
    Json(roster.list_students(&filter).await)
}

pub async fn get_student(
    State(roster): State<Arc<RosterStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student = roster
        .get_student(&id)
        .await
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

pub async fn create_student(
    State(roster): State<Arc<RosterStore>>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let student = roster.create_student(payload).await?;
    tracing::info!("Created student {} in {} ({})", student.id, student.klasse, student.jahrgang);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Student created", "student": student })),
    ))
}

/// Renames or moves a student.
pub async fn update_student(
    State(roster): State<Arc<RosterStore>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let student = roster.update_student(&id, payload).await?;

    Ok(Json(json!({ "message": "Student updated", "student": student })))
}

/// Moves the selected students into one class.
pub async fn move_students(
    State(roster): State<Arc<RosterStore>>,
    AppJson(payload): AppJson<MoveStudentsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let moved = roster
        .move_students(&payload.ids, &payload.klasse, &payload.jahrgang)
        .await?;
    tracing::info!("Moved {} students to {} ({})", moved, payload.klasse, payload.jahrgang);

    Ok(Json(json!({ "message": "Students moved", "moved": moved })))
}

pub async fn delete_student(
    State(roster): State<Arc<RosterStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    roster.delete_student(&id).await?;

    Ok(Json(json!({ "message": "Student deleted" })))
}
