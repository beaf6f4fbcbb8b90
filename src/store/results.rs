// src/store/results.rs

use std::path::PathBuf;

use crate::{
    error::AppError,
    models::result::QuizResult,
    store::JsonFile,
    utils::normalize_name,
};

/// Append-only log of scored submissions (`results.json`).
#[derive(Debug)]
pub struct ResultStore {
    file: JsonFile<QuizResult>,
}

impl ResultStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        Ok(Self {
            file: JsonFile::open(path).await?,
        })
    }

    pub async fn append(&self, record: QuizResult) -> Result<(), AppError> {
        self.file
            .update(|results| {
                results.push(record);
                Ok(())
            })
            .await
    }

    pub async fn list_all(&self) -> Vec<QuizResult> {
        self.file.load().await
    }

    /// Results whose teacher matches `lehrer`, ignoring case and surrounding whitespace.
    pub async fn list_by_teacher(&self, lehrer: &str) -> Vec<QuizResult> {
        let wanted = normalize_name(lehrer);
        self.file
            .load()
            .await
            .into_iter()
            .filter(|r| normalize_name(&r.lehrer) == wanted)
            .collect()
    }

    /// Removes one result. Fails with `NotFound` (and writes nothing) if the id is unknown.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        self.file
            .update(|results| {
                let initial = results.len();
                results.retain(|r| r.id != id);
                if results.len() == initial {
                    return Err(AppError::NotFound("Result not found".to_string()));
                }
                Ok(())
            })
            .await
    }

    /// Removes every result whose `submittedAt` starts with `prefix`.
    /// Returns the number of removed records.
    pub async fn delete_by_date_prefix(&self, prefix: &str) -> Result<usize, AppError> {
        self.file
            .update(|results| {
                let initial = results.len();
                results.retain(|r| !r.submitted_at.starts_with(prefix));
                Ok(initial - results.len())
            })
            .await
    }

    /// Removes all results. Returns the number of removed records.
    pub async fn delete_all(&self) -> Result<usize, AppError> {
        self.file
            .update(|results| {
                let removed = results.len();
                results.clear();
                Ok(removed)
            })
            .await
    }
}
