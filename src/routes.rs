// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    extractors::TEACHER_HEADER,
    handlers::{auth, classes, quiz, results, students},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Quiz, roster, teacher and result routes.
/// * Static clients: `/admin` from the admin directory, everything else
///   falls back to the public directory.
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(TEACHER_HEADER)]);

    let api_routes = Router::new()
        .route("/tasks", get(quiz::get_tasks))
        .route("/teachers", get(auth::list_teachers))
        .route("/login", post(auth::login))
        .route("/classes", get(classes::list_classes).post(classes::create_class))
        .route(
            "/classes/{name}/{jahrgang}",
            put(classes::update_class).delete(classes::delete_class),
        )
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route("/students/move", post(students::move_students))
        .route(
            "/students/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        );

    let admin_client = ServeDir::new(&state.config.admin_dir);
    let public_client = ServeDir::new(&state.config.public_dir);

    Router::new()
        .nest("/api", api_routes)
        .route("/submit", post(quiz::submit))
        .route(
            "/results",
            get(results::list_results).delete(results::delete_all_results),
        )
        .route("/results/report", get(results::results_report))
        .route("/results/date/{date}", delete(results::delete_results_by_date))
        .route("/results/{id}", delete(results::delete_result))
        .nest_service("/admin", admin_client)
        .fallback_service(public_client)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
