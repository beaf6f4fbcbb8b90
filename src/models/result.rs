// src/models/result.rs

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::AppError, models::task::TaskKey, utils::lenient};

/// Per-task record pairing the given answer with the canonical solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    #[serde(default)]
    pub question: String,
    /// Raw answer as typed by the student; `None` when nothing was given.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub given: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub correct: i64,
    #[serde(default)]
    pub is_correct: bool,
}

impl Correction {
    /// Reads one entry of a stored answer map.
    ///
    /// Older records hold whatever the client sent: a full correction, an
    /// object with only `given`, or the bare value. Missing or unusable
    /// fields fall back to their defaults.
    pub fn from_stored(value: &Value) -> Self {
        match value {
            Value::Object(fields) => Self {
                question: fields.get("question").and_then(lenient::text).unwrap_or_default(),
                given: fields.get("given").and_then(lenient::text),
                correct: fields
                    .get("correct")
                    .and_then(lenient::integer_value)
                    .unwrap_or_default(),
                is_correct: fields
                    .get("isCorrect")
                    .and_then(Value::as_bool)
                    .unwrap_or_default(),
            },
            other => Self {
                question: String::new(),
                given: lenient::text(other),
                correct: 0,
                is_correct: false,
            },
        }
    }
}

pub type Corrections = BTreeMap<TaskKey, Correction>;

/// Answer map of a stored result. Entries with keys that are not task keys
/// are skipped; anything but an object reads as an empty map.
fn stored_corrections<'de, D>(deserializer: D) -> Result<Corrections, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(Corrections::new());
    };

    Ok(entries
        .iter()
        .filter_map(|(key, value)| Some((key.parse().ok()?, Correction::from_stored(value))))
        .collect())
}

/// Stored `timeLeft`; anything that is not an integer reads as absent.
fn stored_time_left<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::integer_value(&Value::deserialize(deserializer)?))
}

/// A scored submission as stored in `results.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub student_id: String,
    pub name: String,
    pub klasse: String,
    #[serde(deserialize_with = "lenient::string")]
    pub jahrgang: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub lehrjahr: String,
    /// Teacher of the student's class at submission time.
    #[serde(default)]
    pub lehrer: String,
    /// Answers as submitted, in correction form.
    #[serde(default, deserialize_with = "stored_corrections")]
    pub answers: Corrections,
    #[serde(default, deserialize_with = "stored_corrections")]
    pub corrections: Corrections,
    #[serde(default, deserialize_with = "stored_time_left")]
    pub time_left: Option<i64>,
    /// ISO-8601 UTC timestamp, e.g. `2025-01-01T08:30:00.000Z`.
    pub submitted_at: String,
}

impl QuizResult {
    /// Calendar day of the submission (`YYYY-MM-DD`).
    pub fn date(&self) -> &str {
        self.submitted_at
            .split('T')
            .next()
            .unwrap_or(&self.submitted_at)
    }

    /// Number of correct answers.
    pub fn score(&self) -> usize {
        self.corrections.values().filter(|c| c.is_correct).count()
    }
}

/// One answer as sent by a client.
///
/// Clients send either the bare value (`"q1": "42"`, `"q1": 42`) or an object
/// carrying it (`"q1": {"given": "42", ...}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Detailed {
        #[serde(default)]
        given: Value,
    },
    Raw(Value),
}

impl SubmittedAnswer {
    /// The answer as text, or `None` when it carries nothing usable.
    pub fn into_given(self) -> Option<String> {
        let value = match self {
            SubmittedAnswer::Detailed { given } => given,
            SubmittedAnswer::Raw(value) => value,
        };
        lenient::text(&value)
    }
}

/// `answers` of a submit body; `null` reads as no answers.
fn submitted_answers<'de, D>(deserializer: D) -> Result<HashMap<String, SubmittedAnswer>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /submit` as received.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "submitted_answers")]
    pub answers: HashMap<String, SubmittedAnswer>,
    #[serde(default, deserialize_with = "lenient::optional_integer")]
    pub time_left: Option<i64>,
}

impl SubmitRequest {
    /// Normalizes the request into a typed [`Submission`].
    ///
    /// Fails when `studentId` is missing or blank. Answers with keys that are
    /// not task keys, or without a usable value, are dropped.
    pub fn normalize(self) -> Result<Submission, AppError> {
        let student_id = self
            .student_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("studentId is required".to_string()))?;

        let answers = self
            .answers
            .into_iter()
            .filter_map(|(key, answer)| {
                let key = key.parse::<TaskKey>().ok()?;
                let given = answer.into_given()?;
                Some((key, given))
            })
            .collect();

        Ok(Submission {
            student_id,
            answers,
            time_left: self.time_left,
        })
    }
}

/// A normalized submission: one optional text answer per task key.
///
/// Serializes into a body that `POST /submit` accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub student_id: String,
    pub answers: BTreeMap<TaskKey, String>,
    pub time_left: Option<i64>,
}

/// Response of `POST /submit`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    pub corrections: Corrections,
    pub score: usize,
    pub total: usize,
    pub feedback: Option<String>,
}
