// src/models/teacher.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A teacher account as stored in `teachers.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub lehrer: String,

    /// Argon2 PHC hash, or plaintext in hand-maintained files.
    pub password: String,
}

/// Public view of a teacher: the name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSummary {
    pub lehrer: String,
}

/// DTO for teacher login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "lehrer and password are required"))]
    pub lehrer: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "lehrer and password are required"))]
    pub password: String,
}
