// src/handlers/results.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    extractors::TeacherScope,
    quiz::report::{Grouping, ReportFilter, build_report},
    store::ResultStore,
};

/// Lists results, optionally only those of one teacher.
pub async fn list_results(
    State(results): State<Arc<ResultStore>>,
    TeacherScope(lehrer): TeacherScope,
) -> impl IntoResponse {
    let list = match lehrer {
        Some(lehrer) => results.list_by_teacher(&lehrer).await,
        None => results.list_all().await,
    };
    Json(list)
}

/// Query parameters of the grouped admin view.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(default)]
    pub group: Grouping,
    #[serde(flatten)]
    pub filter: ReportFilter,
}

/// Filtered results grouped by class, Jahrgang and date or student.
pub async fn results_report(
    State(results): State<Arc<ResultStore>>,
    TeacherScope(lehrer): TeacherScope,
    Query(params): Query<ReportParams>,
) -> impl IntoResponse {
    let mut filter = params.filter;
    if filter.lehrer.is_none() {
        filter.lehrer = lehrer;
    }

    let all = results.list_all().await;
    let report = build_report(filter.apply(&all), params.group);

    Json(report)
}

/// Deletes a single result by ID.
pub async fn delete_result(
    State(results): State<Arc<ResultStore>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    results.delete_by_id(&id).await?;
    tracing::info!("Deleted result {}", id);

    Ok(Json(json!({ "message": "Result deleted" })))
}

/// Deletes every result submitted on a date (any `submittedAt` prefix).
pub async fn delete_results_by_date(
    State(results): State<Arc<ResultStore>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = results.delete_by_date_prefix(&date).await?;
    tracing::info!("Deleted {} results from {}", deleted, date);

    Ok(Json(json!({
        "message": format!("All results from {} deleted", date),
        "deleted": deleted,
    })))
}

/// Deletes all results.
pub async fn delete_all_results(
    State(results): State<Arc<ResultStore>>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = results.delete_all().await?;
    tracing::warn!("Deleted all {} results", deleted);

    Ok(Json(json!({
        "message": "All results deleted",
        "deleted": deleted,
    })))
}
