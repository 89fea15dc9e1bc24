use hustle_core::assessment::{AssessmentDraft, AssessmentError, Answers, Question, Step};
use hustle_core::leveling::ASSESSMENT_XP;
use hustle_core::model::{TrackId, XpGain};
use hustle_core::recommendation::recommend;
use tracing::info;

use crate::user_state::UserStateStore;

/// What finishing the questionnaire produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentOutcome {
    /// Engine output, in rule order, before catalog filtering.
    pub suggested: Vec<TrackId>,
    /// Recommendations as stored on the record.
    pub recommended: Vec<TrackId>,
    pub xp: XpGain,
}

/// Drives the questionnaire. Answers stay in memory until `finish`.
#[derive(Debug, Clone, Default)]
pub struct AssessmentFlow {
    draft: AssessmentDraft,
}

impl AssessmentFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> &'static Question {
        self.draft.current()
    }

    #[must_use]
    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    /// # Errors
    ///
    /// Returns `AssessmentError::UnknownOption` for a value the current
    /// question does not offer.
    pub fn answer(&mut self, value: &str) -> Result<(), AssessmentError> {
        self.draft.answer(value)
    }

    /// # Errors
    ///
    /// Returns `AssessmentError::Unanswered` if the current question has no
    /// answer yet.
    pub fn next(&mut self) -> Result<Step, AssessmentError> {
        self.draft.next()
    }

    pub fn previous(&mut self) -> usize {
        self.draft.previous()
    }

    /// Score the completed questionnaire and record the outcome.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Incomplete` if any question is unanswered.
    pub async fn finish(
        self,
        store: &mut UserStateStore,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        let answers = self.draft.finish()?;
        Ok(submit(store, &answers).await)
    }
}

/// Record an assessment from an answer sheet gathered elsewhere.
///
/// Runs the recommendation rules, stores the result, marks the assessment
/// completed and awards the assessment XP.
pub async fn submit(store: &mut UserStateStore, answers: &Answers) -> AssessmentOutcome {
    let suggested = recommend(answers);
    store.set_recommended_tracks(suggested.iter().cloned()).await;
    store.set_assessment_completed(true).await;
    let xp = store.add_xp(ASSESSMENT_XP).await;

    let recommended = store.recommended_track_ids().to_vec();
    info!(?recommended, "assessment completed");

    AssessmentOutcome {
        suggested,
        recommended,
        xp,
    }
}
