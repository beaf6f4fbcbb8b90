// src/models/roster.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::lenient;

/// A student on the roster.
///
/// The class is referenced by the denormalized `(klasse, jahrgang)` pair, not
/// by a foreign key; moving a student is a plain field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    pub name: String,
    pub klasse: String,
    #[serde(deserialize_with = "lenient::string")]
    pub jahrgang: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lehrjahr: String,
}

/// A class, unique by `(name, jahrgang)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub jahrgang: String,
    /// Owning teacher; empty when unassigned.
    #[serde(default)]
    pub lehrer: String,
}

impl SchoolClass {
    pub fn is(&self, name: &str, jahrgang: &str) -> bool {
        self.name == name && self.jahrgang == jahrgang
    }

    /// Whether `student` sits in this class. A class stored without a
    /// Jahrgang holds students of every Jahrgang with that class name.
    pub fn contains(&self, student: &Student) -> bool {
        self.name == student.klasse
            && (self.jahrgang.is_empty() || self.jahrgang == student.jahrgang)
    }
}

/// DTO for creating a class.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Class name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(length(min = 1, max = 20, message = "Jahrgang is required"))]
    pub jahrgang: String,
    #[serde(default)]
    pub lehrer: Option<String>,
}

/// DTO for reassigning a class to another teacher.
#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub lehrer: Option<String>,
}

/// DTO for adding a student.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Klasse is required"))]
    pub klasse: String,
    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(length(min = 1, max = 20, message = "Jahrgang is required"))]
    pub jahrgang: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub lehrjahr: Option<String>,
}

/// DTO for renaming or moving a student. Fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub lehrjahr: Option<String>,
    pub klasse: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub jahrgang: Option<String>,
}

/// DTO for moving several students into one class at once.
#[derive(Debug, Deserialize, Validate)]
pub struct MoveStudentsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "No students selected"))]
    pub ids: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Klasse is required"))]
    pub klasse: String,
    #[serde(default, deserialize_with = "lenient::string")]
    #[validate(length(min = 1, message = "Jahrgang is required"))]
    pub jahrgang: String,
}

/// Query parameters for listing students.
#[derive(Debug, Default, Deserialize)]
pub struct StudentFilter {
    pub klasse: Option<String>,
    pub jahrgang: Option<String>,
    pub lehrer: Option<String>,
}
