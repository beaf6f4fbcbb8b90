// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    extractors::AppJson,
    models::{
        result::{QuizResult, SubmitRequest, SubmitResponse},
        task::TaskSet,
    },
    quiz::scoring::{feedback_message, score},
    store::{ResultStore, RosterStore},
    utils::{generate_id, now_iso},
};

/// Returns the quiz of this server run, solutions included.
pub async fn get_tasks(State(tasks): State<Arc<TaskSet>>) -> Json<TaskSet> {
    Json(tasks.as_ref().clone())
}

/// Scores a student's answers and stores the result.
///
/// * Rejects missing or unknown `studentId` with 400.
/// * Scores server-side against the current task set; the client's own
///   correctness claims are discarded.
/// * Tags the result with the teacher of the student's class at this moment.
pub async fn submit(
    State(tasks): State<Arc<TaskSet>>,
    State(roster): State<Arc<RosterStore>>,
    State(results): State<Arc<ResultStore>>,
    AppJson(req): AppJson<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let submission = req.normalize()?;

    let student = roster
        .get_student(&submission.student_id)
        .await
        .ok_or_else(|| AppError::BadRequest("Unknown student (studentId)".to_string()))?;

    let lehrer = roster.teacher_of(&student).await.unwrap_or_default();
    let scorecard = score(&tasks, &submission);

    let lehrjahr = if student.lehrjahr.is_empty() {
        student.jahrgang.clone()
    } else {
        student.lehrjahr.clone()
    };

    let record = QuizResult {
        id: generate_id(),
        student_id: student.id,
        name: student.name,
        klasse: student.klasse,
        jahrgang: student.jahrgang,
        lehrjahr,
        lehrer: lehrer.clone(),
        answers: scorecard.corrections.clone(),
        corrections: scorecard.corrections.clone(),
        time_left: submission.time_left,
        submitted_at: now_iso(),
    };

    tracing::info!(
        "Result {} for student {}: {}/{}",
        record.id,
        record.student_id,
        scorecard.score,
        scorecard.total
    );

    results.append(record).await.map_err(|e| {
        tracing::error!("Failed to store result: {:?}", e);
        e
    })?;

    Ok(Json(SubmitResponse {
        message: "Results saved".to_string(),
        feedback: feedback_message(scorecard.score, Some(lehrer.as_str())),
        corrections: scorecard.corrections,
        score: scorecard.score,
        total: scorecard.total,
    }))
}
