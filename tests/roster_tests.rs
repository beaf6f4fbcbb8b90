// tests/roster_tests.rs

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use einmaleins::{config::Config, models::task::TaskSet, routes, state::AppState};
use serde_json::{Value, json};
use std::path::PathBuf;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: AppState,
    data_dir: PathBuf,
}

async fn spawn_app() -> TestApp {
    let data_dir =
        std::env::temp_dir().join(format!("einmaleins_roster_{}", uuid::Uuid::new_v4()));
    let config = Config::with_data_dir(&data_dir);
    let state = AppState::open(config, TaskSet::default())
        .await
        .expect("Failed to open test data directory");
    let router = routes::create_router(state.clone());

    TestApp {
        router,
        state,
        data_dir,
    }
}

impl TestApp {
    /// Sends one request through the router, returning status and JSON body
    /// (`Value::Null` for empty bodies).
    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn read_file(&self, name: &str) -> Vec<Value> {
        let content = std::fs::read_to_string(self.data_dir.join(name)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

#[tokio::test]
async fn collections_are_created_empty() {
    let app = spawn_app().await;

    for file in ["results.json", "students.json", "classes.json", "teachers.json"] {
        assert!(app.read_file(file).is_empty(), "{} should start empty", file);
    }
}

#[tokio::test]
async fn duplicate_class_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    let class = json!({ "name": "5a", "jahrgang": "2025" });

    // Act
    let (first, _) = app.call(Method::POST, "/api/classes", Some(class.clone())).await;
    let (second, body) = app.call(Method::POST, "/api/classes", Some(class)).await;

    // Assert
    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("5a"));
    assert_eq!(app.read_file("classes.json").len(), 1);
}

#[tokio::test]
async fn same_class_name_in_another_jahrgang_is_allowed() {
    let app = spawn_app().await;

    let (a, _) = app
        .call(Method::POST, "/api/classes", Some(json!({ "name": "5a", "jahrgang": "2025" })))
        .await;
    let (b, body) = app
        .call(Method::POST, "/api/classes", Some(json!({ "name": "5a", "jahrgang": 2026 })))
        .await;

    assert_eq!(a, StatusCode::CREATED);
    assert_eq!(b, StatusCode::CREATED);
    assert_eq!(body["classes"].as_array().unwrap().len(), 2);
    assert_eq!(body["classes"][1]["jahrgang"], "2026");
}

#[tokio::test]
async fn class_requires_name_and_jahrgang() {
    let app = spawn_app().await;

    let (status, body) = app
        .call(Method::POST, "/api/classes", Some(json!({ "name": "5a" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(app.read_file("classes.json").is_empty());
}

#[tokio::test]
async fn class_teacher_can_be_changed_and_filtered() {
    // Arrange
    let app = spawn_app().await;
    app.call(
        Method::POST,
        "/api/classes",
        Some(json!({ "name": "5a", "jahrgang": "2025", "lehrer": "Frau Berg" })),
    )
    .await;
    app.call(
        Method::POST,
        "/api/classes",
        Some(json!({ "name": "6c", "jahrgang": "2025", "lehrer": "Herr Kurz" })),
    )
    .await;

    // Act
    let (status, body) = app
        .call(
            Method::PUT,
            "/api/classes/6c/2025",
            Some(json!({ "lehrer": "Frau Berg" })),
        )
        .await;
    let (missing, _) = app
        .call(Method::PUT, "/api/classes/9z/2025", Some(json!({ "lehrer": "x" })))
        .await;
    let (_, berg) = app.call(Method::GET, "/api/classes?lehrer=frau%20berg", None).await;
    let (_, kurz) = app.call(Method::GET, "/api/classes?lehrer=Herr%20Kurz", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["klasse"]["lehrer"], "Frau Berg");
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(berg.as_array().unwrap().len(), 2);
    assert!(kurz.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_class_keeps_its_students() {
    // Arrange
    let app = spawn_app().await;
    app.call(Method::POST, "/api/classes", Some(json!({ "name": "5a", "jahrgang": "2025" })))
        .await;
    app.call(
        Method::POST,
        "/api/students",
        Some(json!({ "name": "Mia", "klasse": "5a", "jahrgang": "2025" })),
    )
    .await;

    // Act
    let (deleted, _) = app.call(Method::DELETE, "/api/classes/5a/2025", None).await;
    let (again, _) = app.call(Method::DELETE, "/api/classes/5a/2025", None).await;

    // Assert
    assert_eq!(deleted, StatusCode::NO_CONTENT);
    assert_eq!(again, StatusCode::NOT_FOUND);
    assert!(app.read_file("classes.json").is_empty());
    assert_eq!(app.read_file("students.json").len(), 1);
}

#[tokio::test]
async fn student_lifecycle() {
    let app = spawn_app().await;

    // Create
    let (status, body) = app
        .call(
            Method::POST,
            "/api/students",
            Some(json!({ "name": "Mia", "klasse": "5a", "jahrgang": 2025 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["student"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["student"]["jahrgang"], "2025");
    assert_eq!(body["student"]["lehrjahr"], "2025");

    // Rename; empty names are ignored
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/students/{}", id),
            Some(json!({ "name": "Mia K.", "lehrjahr": "2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["name"], "Mia K.");
    assert_eq!(body["student"]["lehrjahr"], "2");

    let (_, body) = app
        .call(Method::PUT, &format!("/api/students/{}", id), Some(json!({ "name": "" })))
        .await;
    assert_eq!(body["student"]["name"], "Mia K.");

    // Move into a class that does not exist: no referential check
    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/students/{}", id),
            Some(json!({ "klasse": "6b", "jahrgang": 2024 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["klasse"], "6b");
    assert_eq!(body["student"]["jahrgang"], "2024");

    // Fetch
    let (status, body) = app.call(Method::GET, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["klasse"], "6b");

    // Delete twice
    let (first, _) = app.call(Method::DELETE, &format!("/api/students/{}", id), None).await;
    let (second, _) = app.call(Method::DELETE, &format!("/api/students/{}", id), None).await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);

    let (status, _) = app.call(Method::GET, &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_requires_name_klasse_and_jahrgang() {
    let app = spawn_app().await;

    let (status, _) = app
        .call(Method::POST, "/api/students", Some(json!({ "name": "Mia", "klasse": "5a" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.read_file("students.json").is_empty());
}

#[tokio::test]
async fn students_filter_by_class_jahrgang_and_teacher() {
    // Arrange
    let app = spawn_app().await;
    app.call(
        Method::POST,
        "/api/classes",
        Some(json!({ "name": "5a", "jahrgang": "2025", "lehrer": "Frau Berg" })),
    )
    .await;
    app.call(
        Method::POST,
        "/api/classes",
        Some(json!({ "name": "5a", "jahrgang": "2024", "lehrer": "Herr Kurz" })),
    )
    .await;
    for (name, jahrgang) in [("Mia", "2025"), ("Ben", "2025"), ("Ada", "2024")] {
        app.call(
            Method::POST,
            "/api/students",
            Some(json!({ "name": name, "klasse": "5a", "jahrgang": jahrgang })),
        )
        .await;
    }

    // Act
    let (_, all_5a) = app.call(Method::GET, "/api/students?klasse=5a", None).await;
    let (_, cohort) = app
        .call(Method::GET, "/api/students?klasse=5a&jahrgang=2024", None)
        .await;
    let (_, berg) = app.call(Method::GET, "/api/students?lehrer=FRAU%20BERG", None).await;

    // Assert
    assert_eq!(all_5a.as_array().unwrap().len(), 3);
    assert_eq!(cohort.as_array().unwrap().len(), 1);
    assert_eq!(cohort[0]["name"], "Ada");
    let names: Vec<&str> = berg
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Mia", "Ben"]);
}

#[tokio::test]
async fn students_can_be_moved_in_bulk() {
    // Arrange
    let app = spawn_app().await;
    let mut ids = Vec::new();
    for name in ["Mia", "Ben", "Ada"] {
        let (_, body) = app
            .call(
                Method::POST,
                "/api/students",
                Some(json!({ "name": name, "klasse": "5a", "jahrgang": "2025" })),
            )
            .await;
        ids.push(body["student"]["id"].as_str().unwrap().to_string());
    }

    // Act
    let (status, body) = app
        .call(
            Method::POST,
            "/api/students/move",
            Some(json!({ "ids": [ids[0], ids[2], "unknown"], "klasse": "6a", "jahrgang": "2026" })),
        )
        .await;
    let (empty, _) = app
        .call(
            Method::POST,
            "/api/students/move",
            Some(json!({ "ids": [], "klasse": "6a", "jahrgang": "2026" })),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moved"], 2);
    assert_eq!(empty, StatusCode::BAD_REQUEST);

    let (_, moved) = app
        .call(Method::GET, "/api/students?klasse=6a&jahrgang=2026", None)
        .await;
    assert_eq!(moved.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn teacher_login() {
    // Arrange: one seeded (hashed) and one hand-written (plaintext) account
    let app = spawn_app().await;
    std::fs::write(
        app.data_dir.join("teachers.json"),
        json!([{ "lehrer": "Herr Kurz", "password": "kreide" }]).to_string(),
    )
    .unwrap();
    assert!(app.state.teachers.seed("Frau Berg", "geheim").await.unwrap());
    assert!(!app.state.teachers.seed(" frau berg ", "anders").await.unwrap());

    // Act
    let (hashed_ok, hashed_body) = app
        .call(
            Method::POST,
            "/api/login",
            Some(json!({ "lehrer": "  frau BERG", "password": "geheim" })),
        )
        .await;
    let (plain_ok, plain_body) = app
        .call(
            Method::POST,
            "/api/login",
            Some(json!({ "lehrer": "Herr Kurz", "password": "kreide" })),
        )
        .await;
    let (wrong, _) = app
        .call(
            Method::POST,
            "/api/login",
            Some(json!({ "lehrer": "Frau Berg", "password": "falsch" })),
        )
        .await;
    let (missing, _) = app
        .call(Method::POST, "/api/login", Some(json!({ "lehrer": "Frau Berg" })))
        .await;
    let (_, teachers) = app.call(Method::GET, "/api/teachers", None).await;

    // Assert
    assert_eq!(hashed_ok, StatusCode::OK);
    assert_eq!(hashed_body["lehrer"], "Frau Berg");
    assert_eq!(plain_ok, StatusCode::OK);
    assert_eq!(plain_body["lehrer"], "Herr Kurz");
    assert_eq!(wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(missing, StatusCode::BAD_REQUEST);

    assert_eq!(
        teachers,
        json!([{ "lehrer": "Herr Kurz" }, { "lehrer": "Frau Berg" }])
    );
    let stored = app.read_file("teachers.json");
    assert!(stored[1]["password"].as_str().unwrap().starts_with("$argon2"));
}
