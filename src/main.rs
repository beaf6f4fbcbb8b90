// src/main.rs

use dotenvy::dotenv;
use einmaleins::config::Config;
use einmaleins::quiz::generator::generate_tasks;
use einmaleins::routes;
use einmaleins::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // One quiz per server run, shared by every student
    let tasks = generate_tasks(&mut rand::thread_rng());
    tracing::info!("Generated {} tasks", tasks.len());

    let state = AppState::open(config.clone(), tasks)
        .await
        .expect("Failed to open data directory");
    tracing::info!("Data directory ready: {}", config.data_dir.display());

    // Seed teacher account
    if let (Some(lehrer), Some(password)) = (&config.admin_teacher, &config.admin_password) {
        match state.teachers.seed(lehrer, password).await {
            Ok(true) => tracing::info!("Seeded teacher account: {}", lehrer),
            Ok(false) => tracing::debug!("Teacher account {} already exists", lehrer),
            Err(e) => tracing::error!("Failed to seed teacher account: {:?}", e),
        }
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
