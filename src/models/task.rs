// src/models/task.rs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of a task within a quiz: `q1`, `q2`, ... .
///
/// Ordered by the numeric suffix so that maps keyed by `TaskKey` iterate and
/// serialize as `q1, q2, ..., q100` rather than lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskKey(pub u32);

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl FromStr for TaskKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Canonical form only: `q1` but not `q01` or `q+1`.
        s.strip_prefix('q')
            .filter(|n| !n.starts_with('0') && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse::<u32>().ok())
            .map(TaskKey)
            .ok_or_else(|| format!("invalid task key '{}'", s))
    }
}

impl Serialize for TaskKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single multiplication task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Human readable question, e.g. `"7 ⋅ 8"`.
    pub question: String,
    pub solution: i64,
}

impl Task {
    pub fn multiplication(i: i64, j: i64) -> Self {
        Self {
            question: format!("{} ⋅ {}", i, j),
            solution: i * j,
        }
    }
}

/// The quiz handed to every student of a server run.
///
/// Serializes as a JSON object `{"q1": {...}, "q2": {...}}` in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskSet {
    tasks: BTreeMap<TaskKey, Task>,
}

impl TaskSet {
    /// Builds a set from an ordered task list, keyed `q1..qN`.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks = tasks
            .into_iter()
            .enumerate()
            .map(|(idx, task)| (TaskKey(idx as u32 + 1), task))
            .collect();
        Self { tasks }
    }

    pub fn get(&self, key: &TaskKey) -> Option<&Task> {
        self.tasks.get(key)
    }

    pub fn contains(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &TaskKey> {
        self.tasks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskKey, &Task)> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
