// tests/quiz_tests.rs

use std::collections::HashSet;

use einmaleins::{
    models::{
        result::{SubmitRequest, Submission},
        task::{Task, TaskKey, TaskSet},
    },
    quiz::{
        generator::generate_tasks,
        scoring::{feedback_message, is_correct, numeric, score},
    },
};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;

fn submission(answers: &[(u32, &str)]) -> Submission {
    Submission {
        student_id: "S1".to_string(),
        answers: answers
            .iter()
            .map(|(n, given)| (TaskKey(*n), given.to_string()))
            .collect(),
        time_left: Some(0),
    }
}

#[test]
fn generated_set_is_a_permutation_of_the_table() {
    for seed in 0..20 {
        let tasks = generate_tasks(&mut StdRng::seed_from_u64(seed));

        assert_eq!(tasks.len(), 100);

        let keys: Vec<String> = tasks.keys().map(|k| k.to_string()).collect();
        let expected: Vec<String> = (1..=100).map(|n| format!("q{}", n)).collect();
        assert_eq!(keys, expected);

        let mut pairs = HashSet::new();
        for (_, task) in tasks.iter() {
            let (i, j) = task.question.split_once(" ⋅ ").unwrap();
            let (i, j): (i64, i64) = (i.parse().unwrap(), j.parse().unwrap());
            assert!((1..=10).contains(&i) && (1..=10).contains(&j));
            assert_eq!(task.solution, i * j);
            pairs.insert((i, j));
        }
        assert_eq!(pairs.len(), 100, "every pair drawn exactly once");
    }
}

#[test]
fn generated_order_depends_on_the_rng() {
    let a = generate_tasks(&mut StdRng::seed_from_u64(1));
    let b = generate_tasks(&mut StdRng::seed_from_u64(2));
    let again = generate_tasks(&mut StdRng::seed_from_u64(1));

    assert_ne!(a, b);
    assert_eq!(a, again);
}

#[test]
fn task_keys_order_numerically_and_parse_strictly() {
    let mut keys: Vec<TaskKey> = ["q10", "q2", "q100", "q1"]
        .iter()
        .map(|k| k.parse().unwrap())
        .collect();
    keys.sort();
    let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["q1", "q2", "q10", "q100"]);

    assert!("q0".parse::<TaskKey>().is_err());
    assert!("x1".parse::<TaskKey>().is_err());
    assert!("q".parse::<TaskKey>().is_err());
    assert!("q-3".parse::<TaskKey>().is_err());
    assert!("q01".parse::<TaskKey>().is_err());
    assert!("q+1".parse::<TaskKey>().is_err());
    assert!("q1 ".parse::<TaskKey>().is_err());
}

#[test]
fn padded_keys_do_not_shadow_canonical_answers() {
    for _ in 0..10 {
        let req: SubmitRequest = serde_json::from_value(json!({
            "studentId": "S1",
            "answers": { "q01": "7", "q+1": "8", "q1": "4" }
        }))
        .unwrap();

        let submission = req.normalize().unwrap();

        assert_eq!(submission.answers.len(), 1);
        assert_eq!(submission.answers[&TaskKey(1)], "4");
    }
}

#[test]
fn task_set_serializes_in_key_order() {
    let tasks = TaskSet::from_tasks((1..=12).map(|n| Task::multiplication(n, 1)));
    let json = serde_json::to_string(&tasks).unwrap();

    let q2 = json.find("\"q2\"").unwrap();
    let q10 = json.find("\"q10\"").unwrap();
    assert!(q2 < q10);
}

#[test]
fn numeric_coercion() {
    assert_eq!(numeric("42"), Some(42.0));
    assert_eq!(numeric(" 42 "), Some(42.0));
    assert_eq!(numeric("42.0"), Some(42.0));
    assert_eq!(numeric(""), None);
    assert_eq!(numeric("   "), None);
    assert_eq!(numeric("vier"), None);
    assert_eq!(numeric("inf"), None);
    assert_eq!(numeric("NaN"), None);
    assert_eq!(numeric("1e1"), Some(10.0));
}

#[test]
fn numeric_reads_radix_literals() {
    assert_eq!(numeric("0x10"), Some(16.0));
    assert_eq!(numeric(" 0X1f "), Some(31.0));
    assert_eq!(numeric("0o17"), Some(15.0));
    assert_eq!(numeric("0b101"), Some(5.0));
    assert_eq!(numeric("0x"), None);
    assert_eq!(numeric("0b102"), None);
    assert_eq!(numeric("-0x10"), None);
    assert_eq!(numeric("0x+1"), None);

    assert!(is_correct(Some("0x10"), 16));
}

#[test]
fn correctness_is_numeric_equality() {
    assert!(is_correct(Some("56"), 56));
    assert!(is_correct(Some("56.0"), 56));
    assert!(!is_correct(Some("56.5"), 56));
    assert!(!is_correct(Some("65"), 56));
    assert!(!is_correct(Some("abc"), 56));
    assert!(!is_correct(Some(""), 56));
    assert!(!is_correct(None, 56));
}

#[test]
fn score_produces_one_correction_per_task() {
    let tasks = TaskSet::from_tasks(vec![
        Task::multiplication(2, 2),
        Task::multiplication(3, 3),
        Task::multiplication(4, 4),
    ]);

    let card = score(&tasks, &submission(&[(1, "4"), (2, "10"), (99, "1")]));

    assert_eq!(card.total, 3);
    assert_eq!(card.score, 1);
    assert_eq!(card.corrections.len(), 3);

    let q1 = &card.corrections[&TaskKey(1)];
    assert_eq!(q1.question, "2 ⋅ 2");
    assert_eq!(q1.given.as_deref(), Some("4"));
    assert_eq!(q1.correct, 4);
    assert!(q1.is_correct);

    assert!(!card.corrections[&TaskKey(2)].is_correct);

    let q3 = &card.corrections[&TaskKey(3)];
    assert_eq!(q3.given, None);
    assert!(!q3.is_correct);

    assert!(!card.corrections.contains_key(&TaskKey(99)));
}

#[test]
fn submit_request_normalizes_answer_shapes() {
    let req: SubmitRequest = serde_json::from_value(json!({
        "studentId": 1700000000123u64,
        "answers": {
            "q1": { "question": "2 ⋅ 2", "given": "4", "correct": "4", "isCorrect": true },
            "q2": 9,
            "q3": "12",
            "q4": null,
            "q5": { "isCorrect": true },
            "q6": true,
            "bogus": "1"
        },
        "timeLeft": 500
    }))
    .unwrap();

    let submission = req.normalize().unwrap();

    assert_eq!(submission.student_id, "1700000000123");
    assert_eq!(submission.time_left, Some(500));
    assert_eq!(submission.answers.len(), 3);
    assert_eq!(submission.answers[&TaskKey(1)], "4");
    assert_eq!(submission.answers[&TaskKey(2)], "9");
    assert_eq!(submission.answers[&TaskKey(3)], "12");
}

#[test]
fn submit_request_without_student_is_rejected() {
    for body in [json!({}), json!({ "studentId": "" }), json!({ "studentId": null })] {
        let req: SubmitRequest = serde_json::from_value(body).unwrap();
        assert!(req.normalize().is_err());
    }
}

#[test]
fn client_claims_do_not_change_the_score() {
    let tasks = TaskSet::from_tasks(vec![Task::multiplication(6, 7)]);
    let req: SubmitRequest = serde_json::from_value(json!({
        "studentId": "S1",
        "answers": { "q1": { "given": "41", "isCorrect": true } }
    }))
    .unwrap();

    let card = score(&tasks, &req.normalize().unwrap());

    assert_eq!(card.score, 0);
}

#[test]
fn feedback_messages_follow_score_bands() {
    assert_eq!(
        feedback_message(10, None).as_deref(),
        Some("Übe weiterhin fleißig alle Einmaleinsreihen!")
    );
    assert_eq!(
        feedback_message(50, None).as_deref(),
        Some("Toll, du kannst schon die Hälfte aller Aufgaben!")
    );
    assert_eq!(feedback_message(60, None).as_deref(), Some("Übe fleißig weiter!"));
    assert_eq!(feedback_message(75, None), None);
    assert_eq!(feedback_message(89, None), None);
    assert_eq!(
        feedback_message(92, None).as_deref(),
        Some("Übe weiter, dann schaffst du bald die 100 Punkte!")
    );
    assert_eq!(feedback_message(97, None).as_deref(), Some("Super! Weiter so!"));
    assert_eq!(
        feedback_message(100, Some("Frau Berg")).as_deref(),
        Some("Unglaublich! Du bist ein Einmaleins-Profi! Frau Berg ist stolz auf dich!")
    );
    assert_eq!(
        feedback_message(100, Some("  ")).as_deref(),
        Some("Unglaublich! Du bist ein Einmaleins-Profi! Dein Lehrer ist stolz auf dich!")
    );
}
