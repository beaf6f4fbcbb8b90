// src/quiz/scoring.rs

use crate::models::{
    result::{Correction, Corrections, Submission},
    task::TaskSet,
};

/// Outcome of scoring one submission against a task set.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub corrections: Corrections,
    pub score: usize,
    pub total: usize,
}

/// Numeric value of a typed answer, if it has one.
///
/// Surrounding whitespace is ignored. Decimal and exponent notation are read
/// as floats; unsigned `0x`, `0o` and `0b` literals in their radix. Empty
/// input, other text and non-finite values have no numeric value.
pub fn numeric(given: &str) -> Option<f64> {
    let trimmed = given.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = radix_literal(trimmed) {
        return Some(value);
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn radix_prefix(s: &str) -> Option<u32> {
    match s.get(..1)? {
        "x" | "X" => Some(16),
        "o" | "O" => Some(8),
        "b" | "B" => Some(2),
        _ => None,
    }
}

fn radix_literal(s: &str) -> Option<f64> {
    let rest = s.strip_prefix('0')?;
    let radix = radix_prefix(rest)?;
    let digits = &rest[1..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

/// Whether `given` is numerically equal to `solution`.
pub fn is_correct(given: Option<&str>, solution: i64) -> bool {
    given
        .and_then(numeric)
        .is_some_and(|value| value == solution as f64)
}

/// Scores a submission: one correction per task of `tasks`.
///
/// Tasks without an answer are incorrect. Answers to keys outside `tasks`
/// are ignored.
pub fn score(tasks: &TaskSet, submission: &Submission) -> Scorecard {
    let corrections: Corrections = tasks
        .iter()
        .map(|(key, task)| {
            let given = submission.answers.get(key).cloned();
            let matches = is_correct(given.as_deref(), task.solution);
            (
                *key,
                Correction {
                    question: task.question.clone(),
                    given,
                    correct: task.solution,
                    is_correct: matches,
                },
            )
        })
        .collect();

    let score = corrections.values().filter(|c| c.is_correct).count();

    Scorecard {
        total: corrections.len(),
        corrections,
        score,
    }
}

/// Encouragement shown to the student after a full 100-task quiz.
///
/// Scores from 70 to 89 get no message.
pub fn feedback_message(correct: usize, lehrer: Option<&str>) -> Option<String> {
    let message = match correct {
        0..=49 => "Übe weiterhin fleißig alle Einmaleinsreihen!".to_string(),
        50 => "Toll, du kannst schon die Hälfte aller Aufgaben!".to_string(),
        51..=69 => "Übe fleißig weiter!".to_string(),
        90..=94 => "Übe weiter, dann schaffst du bald die 100 Punkte!".to_string(),
        95..=99 => "Super! Weiter so!".to_string(),
        100 => {
            let who = lehrer
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or("Dein Lehrer");
            format!("Unglaublich! Du bist ein Einmaleins-Profi! {} ist stolz auf dich!", who)
        }
        _ => return None,
    };
    Some(message)
}
