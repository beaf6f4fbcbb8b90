// src/store/teachers.rs

use std::path::PathBuf;

use crate::{
    error::AppError,
    models::teacher::{Teacher, TeacherSummary},
    store::JsonFile,
    utils::{
        hash::{hash_password, password_matches},
        normalize_name,
    },
};

/// Teacher accounts (`teachers.json`).
#[derive(Debug)]
pub struct TeacherStore {
    file: JsonFile<Teacher>,
}

impl TeacherStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        Ok(Self {
            file: JsonFile::open(path).await?,
        })
    }

    /// Teacher names, without passwords.
    pub async fn list_names(&self) -> Vec<TeacherSummary> {
        self.file
            .load()
            .await
            .into_iter()
            .map(|t| TeacherSummary { lehrer: t.lehrer })
            .collect()
    }

    /// Checks credentials and returns the teacher's name as stored.
    pub async fn authenticate(&self, lehrer: &str, password: &str) -> Result<String, AppError> {
        let wanted = normalize_name(lehrer);

        for teacher in self.file.load().await {
            if normalize_name(&teacher.lehrer) == wanted
                && password_matches(password, &teacher.password)?
            {
                return Ok(teacher.lehrer);
            }
        }

        Err(AppError::AuthError("Wrong name or password".to_string()))
    }

    /// Adds a teacher with a hashed password unless one with the same
    /// (normalized) name exists. Returns whether a teacher was added.
    pub async fn seed(&self, lehrer: &str, password: &str) -> Result<bool, AppError> {
        let wanted = normalize_name(lehrer);
        let hashed = hash_password(password)?;

        self.file
            .update(|teachers| {
                if teachers.iter().any(|t| normalize_name(&t.lehrer) == wanted) {
                    return Ok(false);
                }
                teachers.push(Teacher {
                    lehrer: lehrer.trim().to_string(),
                    password: hashed,
                });
                Ok(true)
            })
            .await
    }
}
