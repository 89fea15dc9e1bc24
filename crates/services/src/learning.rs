//! Lesson and quiz flows for a single track.

use hustle_core::leveling::{LESSON_PROGRESS_PERCENT, LESSON_XP};
use hustle_core::model::{ProgressionError, TrackId, XpGain};
use hustle_core::quiz::{Advance, AnswerFeedback, QuizAttempt, QuizQuestion, QuizResult};
use tracing::{debug, info};

use crate::error::LearningError;
use crate::user_state::UserStateStore;

/// Result of finishing a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonOutcome {
    pub progress_percent: u8,
    pub xp: XpGain,
}

/// Result of moving past a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Next { progress_percent: u8 },
    Finished { result: QuizResult, xp: XpGain },
}

fn ensure_unlocked(store: &UserStateStore, id: &str) -> Result<(), LearningError> {
    let track = store
        .track(id)
        .ok_or_else(|| ProgressionError::TrackNotFound(TrackId::new(id)))?;
    if !track.is_unlocked(store.level()) {
        return Err(LearningError::Locked {
            track: track.id().clone(),
            required: track.unlock_level(),
            level: store.level(),
        });
    }
    Ok(())
}

/// Finish a track's lesson: progress moves to 50% and the lesson XP is awarded.
///
/// # Errors
///
/// Returns `LearningError::Progression` for an unknown track and
/// `LearningError::Locked` if the learner's level is too low.
pub async fn complete_lesson(
    store: &mut UserStateStore,
    id: &str,
) -> Result<LessonOutcome, LearningError> {
    ensure_unlocked(store, id)?;
    let progress_percent = store
        .update_track_progress(id, u32::from(LESSON_PROGRESS_PERCENT))
        .await?;
    let xp = store.add_xp(LESSON_XP).await;
    info!(track = id, "lesson completed");
    Ok(LessonOutcome {
        progress_percent,
        xp,
    })
}

/// Mark a track mastered: 100%, completed, completion XP.
///
/// # Errors
///
/// Returns `LearningError::Progression` for an unknown track and
/// `LearningError::Locked` if the learner's level is too low.
pub async fn master_track(store: &mut UserStateStore, id: &str) -> Result<XpGain, LearningError> {
    ensure_unlocked(store, id)?;
    Ok(store.complete_track(id).await?)
}

/// A quiz in progress. Each answered question advances the track's
/// progress; the last one awards XP scaled by the score.
#[derive(Debug, Clone)]
pub struct QuizSession {
    attempt: QuizAttempt,
}

impl QuizSession {
    /// # Errors
    ///
    /// Returns `LearningError::Progression` for an unknown track and
    /// `LearningError::Locked` if the learner's level is too low.
    pub fn start(store: &UserStateStore, id: &str) -> Result<Self, LearningError> {
        ensure_unlocked(store, id)?;
        debug!(track = id, "quiz started");
        Ok(Self {
            attempt: QuizAttempt::new(TrackId::new(id)),
        })
    }

    #[must_use]
    pub fn current(&self) -> Option<&'static QuizQuestion> {
        self.attempt.current()
    }

    #[must_use]
    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    /// Lock in an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Quiz` if the question is already answered,
    /// the option is out of range or the quiz is over.
    pub fn select(&mut self, option: usize) -> Result<AnswerFeedback, LearningError> {
        Ok(self.attempt.select(option)?)
    }

    /// Move past the answered question, recording progress and, after the
    /// last question, the quiz XP.
    ///
    /// # Errors
    ///
    /// Returns `LearningError::Quiz` if the current question is unanswered
    /// or the quiz is over, and `LearningError::Progression` if the track
    /// vanished from the record.
    pub async fn advance(&mut self, store: &mut UserStateStore) -> Result<QuizStep, LearningError> {
        let step = self.attempt.advance()?;
        let track = self.attempt.track().as_str();
        store
            .update_track_progress(track, u32::from(step.progress_percent()))
            .await?;

        match step {
            Advance::Next { progress_percent } => Ok(QuizStep::Next { progress_percent }),
            Advance::Finished { result, .. } => {
                let xp = store.add_xp(result.xp).await;
                info!(track, score = result.score, total = result.total, "quiz finished");
                Ok(QuizStep::Finished { result, xp })
            }
        }
    }
}
