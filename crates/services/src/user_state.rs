use std::sync::Arc;

use hustle_core::model::{ProgressionError, Track, TrackId, UserProgression, XpGain};
use storage::record::{USER_STATE_KEY, UserStateRecord};
use storage::repository::{SlotRepository, StorageError};
use tracing::{debug, info, warn};

/// Owns the learner's progression record and mirrors it to a storage slot.
///
/// Every mutator writes the full record before returning. Storage failures
/// never reach the caller: loads fall back to the seed record and failed
/// writes are logged while the in-memory record stays authoritative.
pub struct UserStateStore {
    slots: Arc<dyn SlotRepository>,
    state: UserProgression,
}

impl UserStateStore {
    /// Load the record from `slots`, or start from the seed record if the
    /// slot is empty, unreadable or unparseable.
    pub async fn load(slots: Arc<dyn SlotRepository>) -> Self {
        let state = match read_record(slots.as_ref()).await {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!(key = USER_STATE_KEY, "no saved progress, starting fresh");
                UserProgression::new()
            }
            Err(err) => {
                warn!(key = USER_STATE_KEY, error = %err, "saved progress unusable, starting fresh");
                UserProgression::new()
            }
        };
        Self { slots, state }
    }

    /// Wrap an existing record without touching storage.
    #[must_use]
    pub fn with_state(slots: Arc<dyn SlotRepository>, state: UserProgression) -> Self {
        Self { slots, state }
    }

    #[must_use]
    pub fn snapshot(&self) -> &UserProgression {
        &self.state
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.state.level()
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.state.xp()
    }

    #[must_use]
    pub fn xp_threshold(&self) -> u64 {
        self.state.xp_threshold()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.state.progress_percent()
    }

    #[must_use]
    pub fn assessment_completed(&self) -> bool {
        self.state.assessment_completed()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        self.state.tracks()
    }

    #[must_use]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.state.track(id)
    }

    #[must_use]
    pub fn recommended_track_ids(&self) -> &[TrackId] {
        self.state.recommended_track_ids()
    }

    /// Award XP, applying any level-ups, and persist.
    pub async fn add_xp(&mut self, amount: u32) -> XpGain {
        let gain = self.state.add_xp(amount);
        log_gain(&gain);
        self.persist().await;
        gain
    }

    /// Record progress on a track and persist.
    ///
    /// Percentages above 100 are clamped; progress never moves backwards.
    /// Returns the track's progress after the update.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::TrackNotFound` for an unknown id; nothing
    /// is changed or written in that case.
    pub async fn update_track_progress(
        &mut self,
        id: &str,
        percent: u32,
    ) -> Result<u8, ProgressionError> {
        if percent > 100 {
            debug!(track = id, percent, "clamping track progress to 100");
        }
        let clamped = u8::try_from(percent.min(100)).unwrap_or(100);
        let progress = self.state.update_track_progress(id, clamped)?;
        debug!(track = id, progress, "track progress updated");
        self.persist().await;
        Ok(progress)
    }

    /// Mark a track completed, award the completion XP and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::TrackNotFound` for an unknown id.
    pub async fn complete_track(&mut self, id: &str) -> Result<XpGain, ProgressionError> {
        let gain = self.state.complete_track(id)?;
        info!(track = id, "track completed");
        log_gain(&gain);
        self.persist().await;
        Ok(gain)
    }

    pub async fn set_assessment_completed(&mut self, completed: bool) {
        self.state.set_assessment_completed(completed);
        self.persist().await;
    }

    /// Replace the recommendation list and persist.
    ///
    /// Ids outside the catalog and repeats are dropped.
    pub async fn set_recommended_tracks<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = TrackId>,
    {
        let dropped = self.state.set_recommended_tracks(ids);
        if !dropped.is_empty() {
            debug!(?dropped, "dropped recommendations outside the catalog or repeated");
        }
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(err) = write_record(self.slots.as_ref(), &self.state).await {
            warn!(key = USER_STATE_KEY, error = %err, "failed to save progress");
        }
    }
}

async fn read_record(slots: &dyn SlotRepository) -> Result<Option<UserProgression>, StorageError> {
    let Some(raw) = slots.read_slot(USER_STATE_KEY).await? else {
        return Ok(None);
    };
    let record = UserStateRecord::from_json(&raw)?;
    Ok(Some(record.into_progression()))
}

async fn write_record(slots: &dyn SlotRepository, state: &UserProgression) -> Result<(), StorageError> {
    let json = UserStateRecord::from_progression(state).to_json()?;
    slots.write_slot(USER_STATE_KEY, &json).await
}

fn log_gain(gain: &XpGain) {
    if gain.leveled_up() {
        info!(
            awarded = gain.awarded,
            levels = gain.levels_gained,
            level = gain.level,
            "level up"
        );
    } else {
        debug!(awarded = gain.awarded, level = gain.level, "xp awarded");
    }
}
