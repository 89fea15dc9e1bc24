//! Shared error types for the services crate.

use thiserror::Error;

use hustle_core::model::{ProgressionError, TrackId};
use hustle_core::quiz::QuizError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the lesson and quiz flows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LearningError {
    #[error("track {track} unlocks at level {required} (current level {level})")]
    Locked {
        track: TrackId,
        required: u32,
        level: u32,
    },
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
