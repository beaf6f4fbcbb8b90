use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    error::AppError,
    models::task::TaskSet,
    store::{
        CLASSES_FILE, RESULTS_FILE, ResultStore, RosterStore, STUDENTS_FILE, TEACHERS_FILE,
        TeacherStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    /// Quiz of this server run.
    pub tasks: Arc<TaskSet>,
    pub results: Arc<ResultStore>,
    pub roster: Arc<RosterStore>,
    pub teachers: Arc<TeacherStore>,
    pub config: Config,
}

impl AppState {
    /// Opens (creating if needed) the collections under `config.data_dir`.
    pub async fn open(config: Config, tasks: TaskSet) -> Result<Self, AppError> {
        let dir = &config.data_dir;

        let results = ResultStore::open(dir.join(RESULTS_FILE)).await?;
        let roster = RosterStore::open(dir.join(CLASSES_FILE), dir.join(STUDENTS_FILE)).await?;
        let teachers = TeacherStore::open(dir.join(TEACHERS_FILE)).await?;

        Ok(Self {
            tasks: Arc::new(tasks),
            results: Arc::new(results),
            roster: Arc::new(roster),
            teachers: Arc::new(teachers),
            config,
        })
    }
}

impl FromRef<AppState> for Arc<TaskSet> {
    fn from_ref(state: &AppState) -> Self {
        state.tasks.clone()
    }
}

impl FromRef<AppState> for Arc<ResultStore> {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}

impl FromRef<AppState> for Arc<RosterStore> {
    fn from_ref(state: &AppState) -> Self {
        state.roster.clone()
    }
}

impl FromRef<AppState> for Arc<TeacherStore> {
    fn from_ref(state: &AppState) -> Self {
        state.teachers.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
