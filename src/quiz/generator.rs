// src/quiz/generator.rs

use rand::{Rng, seq::SliceRandom};

use crate::models::task::{Task, TaskSet};

/// Largest factor of the multiplication table.
pub const TABLE_SIZE: i64 = 10;

/// Number of tasks in a quiz.
pub const TASK_COUNT: usize = 100;

/// Draws a quiz from the multiplication table.
///
/// All `TABLE_SIZE * TABLE_SIZE` ordered pairs are shuffled uniformly and the
/// first `TASK_COUNT` are keyed `q1..`. With a 10x10 table every pair is used
/// exactly once.
pub fn generate_tasks<R: Rng + ?Sized>(rng: &mut R) -> TaskSet {
    let mut pairs: Vec<(i64, i64)> = (1..=TABLE_SIZE)
        .flat_map(|i| (1..=TABLE_SIZE).map(move |j| (i, j)))
        .collect();

    pairs.shuffle(rng);

    TaskSet::from_tasks(
        pairs
            .into_iter()
            .take(TASK_COUNT)
            .map(|(i, j)| Task::multiplication(i, j)),
    )
}
