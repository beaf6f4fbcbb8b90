// src/store/mod.rs

//! File-backed collections.
//!
//! Every collection is a single JSON array on disk. Mutations rewrite the whole
//! file; a per-file async mutex keeps read-modify-write cycles from
//! interleaving, and the new content is renamed into place so readers never
//! observe a half-written file.

pub mod results;
pub mod roster;
pub mod teachers;

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

use crate::error::AppError;

pub use results::ResultStore;
pub use roster::RosterStore;
pub use teachers::TeacherStore;

pub const RESULTS_FILE: &str = "results.json";
pub const STUDENTS_FILE: &str = "students.json";
pub const CLASSES_FILE: &str = "classes.json";
pub const TEACHERS_FILE: &str = "teachers.json";

/// A JSON array file holding records of type `T`.
#[derive(Debug)]
pub struct JsonFile<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Opens the file, creating it (and its directory) as `[]` when absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if !fs::try_exists(&path).await? {
            tracing::info!("Creating empty collection {}", path.display());
            fs::write(&path, "[]").await?;
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            _records: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records.
    ///
    /// A missing or blank file holds no records. A file that cannot be read or
    /// parsed is an error.
    pub async fn read(&self) -> Result<Vec<T>, AppError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads all records for listing.
    ///
    /// An unreadable or unparsable file is logged and yields an empty list.
    pub async fn load(&self) -> Vec<T> {
        self.read().await.unwrap_or_else(|e| {
            tracing::error!("Failed to load {}: {:?}", self.path.display(), e);
            Vec::new()
        })
    }

    /// Runs `f` over the current records and persists the result.
    ///
    /// Nothing is written when `f` returns an error, or when the current
    /// content cannot be read, so a damaged file is never replaced.
    pub async fn update<R, F>(&self, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, AppError>,
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await.inspect_err(|e| {
            tracing::error!(
                "Refusing to rewrite {}: current content unreadable: {:?}",
                self.path.display(),
                e
            );
        })?;
        let outcome = f(&mut records)?;
        self.write(&records).await?;

        Ok(outcome)
    }

    async fn write(&self, records: &[T]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(records)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            tracing::error!("Failed to replace {}: {}", self.path.display(), e);
            AppError::from(e)
        })
    }
}
