#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessment;
pub mod error;
pub mod learning;
pub mod user_state;

pub use app_services::AppServices;
pub use assessment::{AssessmentFlow, AssessmentOutcome};
pub use error::{AppServicesError, LearningError};
pub use learning::{LessonOutcome, QuizSession, QuizStep, complete_lesson, master_track};
pub use user_state::UserStateStore;
