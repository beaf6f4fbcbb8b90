// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// Seconds a student gets for one quiz run.
pub const QUIZ_SECONDS: u32 = 600;

/// Tasks shown per page in the quiz client.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the four JSON collections.
    pub data_dir: PathBuf,
    /// Static student client, served at `/`.
    pub public_dir: PathBuf,
    /// Static admin client, served at `/admin`.
    pub admin_dir: PathBuf,
    pub log_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: Vec<String>,
    /// Optional teacher account created on startup if missing.
    pub admin_teacher: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());
        let admin_dir = env::var("ADMIN_DIR").unwrap_or_else(|_| "admin".to_string());
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    format!("http://localhost:{}", port),
                    format!("http://127.0.0.1:{}", port),
                ]
            });

        Self {
            data_dir: data_dir.into(),
            public_dir: public_dir.into(),
            admin_dir: admin_dir.into(),
            log_dir: log_dir.into(),
            port,
            rust_log,
            cors_origins,
            admin_teacher: env::var("ADMIN_TEACHER").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Configuration rooted at `data_dir`, with every other setting at its default.
    /// Used by tests and tools that do not read the environment.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            public_dir: "public".into(),
            admin_dir: "admin".into(),
            log_dir: "logs".into(),
            port: 3001,
            rust_log: "error".to_string(),
            cors_origins: vec!["http://localhost:3001".to_string()],
            admin_teacher: None,
            admin_password: None,
        }
    }
}
