use thiserror::Error;

use crate::assessment::AssessmentError;
use crate::model::{ParseIdError, ProgressionError};
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Progression(#[from] ProgressionError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    TrackId(#[from] ParseIdError),
}
