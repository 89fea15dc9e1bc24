use thiserror::Error;

use crate::leveling::{LevelState, TRACK_COMPLETION_XP};
use crate::model::catalog;
use crate::model::ids::TrackId;
use crate::model::track::{Track, TrackFilter};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    #[error("track not found: {0}")]
    TrackNotFound(TrackId),
}

//
// ─── XP GAIN ───────────────────────────────────────────────────────────────────
//

/// What an XP award did to the learner's level.
///
/// Returned by every XP-granting mutation so callers can react (toasts,
/// level-up animations) without observing state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    pub awarded: u32,
    pub levels_gained: u32,
    pub level: u32,
}

impl XpGain {
    #[must_use]
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

//
// ─── USER PROGRESSION ──────────────────────────────────────────────────────────
//

/// The learner's progression record: level, XP, tracks and recommendations.
///
/// `xp < xp_threshold` holds after every mutation; the level-wide progress
/// percentage is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProgression {
    levels: LevelState,
    assessment_completed: bool,
    recommended: Vec<TrackId>,
    tracks: Vec<Track>,
}

impl UserProgression {
    /// Default record: level 1, no XP, the built-in catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: LevelState::initial(),
            assessment_completed: false,
            recommended: Vec::new(),
            tracks: catalog::default_tracks(),
        }
    }

    /// Rebuild a record from persisted values.
    ///
    /// Pending level-ups are applied, duplicate tracks are dropped (first
    /// wins) and recommendations are filtered against the tracks.
    #[must_use]
    pub fn from_persisted(
        level: u32,
        xp: u64,
        xp_threshold: u64,
        tracks: Vec<Track>,
        assessment_completed: bool,
        recommended: Vec<TrackId>,
    ) -> Self {
        let (levels, _) = LevelState::new(level, xp, xp_threshold).normalize();

        let mut unique: Vec<Track> = Vec::with_capacity(tracks.len());
        for track in tracks {
            if !unique.iter().any(|existing| existing.id() == track.id()) {
                unique.push(track);
            }
        }
        if unique.is_empty() {
            unique = catalog::default_tracks();
        }

        let mut record = Self {
            levels,
            assessment_completed,
            recommended: Vec::new(),
            tracks: unique,
        };
        record.set_recommended_tracks(recommended);
        record
    }

    // Accessors
    #[must_use]
    pub fn level(&self) -> u32 {
        self.levels.level
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.levels.xp
    }

    #[must_use]
    pub fn xp_threshold(&self) -> u64 {
        self.levels.xp_threshold
    }

    /// `floor(min(xp / xp_threshold, 1) * 100)`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.levels.progress_percent()
    }

    #[must_use]
    pub fn assessment_completed(&self) -> bool {
        self.assessment_completed
    }

    #[must_use]
    pub fn recommended_track_ids(&self) -> &[TrackId] {
        &self.recommended
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id() == id)
    }

    #[must_use]
    pub fn contains_track(&self, id: &str) -> bool {
        self.track(id).is_some()
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Add XP and apply every level-up it pays for.
    pub fn add_xp(&mut self, amount: u32) -> XpGain {
        let (levels, levels_gained) = self.levels.gain(u64::from(amount));
        self.levels = levels;
        XpGain {
            awarded: amount,
            levels_gained,
            level: levels.level,
        }
    }

    /// Record progress on a track. Values above 100 are clamped and
    /// progress never decreases.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::TrackNotFound` and leaves the record
    /// untouched if `id` is not a known track.
    pub fn update_track_progress(&mut self, id: &str, percent: u8) -> Result<u8, ProgressionError> {
        let track = self.track_mut(id)?;
        Ok(track.raise_progress(percent))
    }

    /// Mark a track completed at 100% and award the completion XP.
    ///
    /// # Errors
    ///
    /// Returns `ProgressionError::TrackNotFound` if `id` is not a known track.
    pub fn complete_track(&mut self, id: &str) -> Result<XpGain, ProgressionError> {
        self.track_mut(id)?.mark_completed();
        Ok(self.add_xp(TRACK_COMPLETION_XP))
    }

    pub fn set_assessment_completed(&mut self, completed: bool) {
        self.assessment_completed = completed;
    }

    /// Replace the recommendation list.
    ///
    /// Ids outside the built-in catalog, ids missing from this record and
    /// repeats are dropped; first-seen order is kept. Extra tracks carried
    /// by a stored record are never recommendable.
    /// Returns the ids that were discarded.
    pub fn set_recommended_tracks<I>(&mut self, ids: I) -> Vec<TrackId>
    where
        I: IntoIterator<Item = TrackId>,
    {
        let mut kept: Vec<TrackId> = Vec::new();
        let mut dropped = Vec::new();
        for id in ids {
            let known = catalog::contains(id.as_str()) && self.contains_track(id.as_str());
            if known && !kept.contains(&id) {
                kept.push(id);
            } else {
                dropped.push(id);
            }
        }
        self.recommended = kept;
        dropped
    }

    fn track_mut(&mut self, id: &str) -> Result<&mut Track, ProgressionError> {
        self.tracks
            .iter_mut()
            .find(|track| track.id() == id)
            .ok_or_else(|| ProgressionError::TrackNotFound(TrackId::new(id)))
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn is_unlocked(&self, track: &Track) -> bool {
        track.is_unlocked(self.level())
    }

    #[must_use]
    pub fn is_recommended(&self, id: &str) -> bool {
        self.recommended.iter().any(|rec| rec == id)
    }

    /// Tracks started but not finished, in catalog order.
    pub fn in_progress(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.iter().filter(|track| track.is_in_progress())
    }

    /// Tracks at 100%, in catalog order.
    pub fn finished(&self) -> impl Iterator<Item = &Track> + '_ {
        self.tracks.iter().filter(|track| track.is_finished())
    }

    /// Recommended tracks the current level unlocks, in recommendation order.
    #[must_use]
    pub fn recommended_unlocked(&self) -> Vec<&Track> {
        self.recommended
            .iter()
            .filter_map(|id| self.track(id.as_str()))
            .filter(|track| self.is_unlocked(track))
            .collect()
    }

    /// Tracks matching a listing filter, optionally narrowed to one unlock level.
    #[must_use]
    pub fn filter(&self, filter: TrackFilter, unlock_level: Option<u32>) -> Vec<&Track> {
        self.tracks
            .iter()
            .filter(|track| unlock_level.is_none_or(|level| track.unlock_level() == level))
            .filter(|track| match filter {
                TrackFilter::All => true,
                TrackFilter::InProgress => track.is_in_progress(),
                TrackFilter::Completed => track.is_completed(),
                TrackFilter::Recommended => self.is_recommended(track.id().as_str()),
            })
            .collect()
    }
}

impl Default for UserProgression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{
        FREELANCE_WRITING, GRAPHIC_DESIGN, ONLINE_TUTORING, SOCIAL_MEDIA_MANAGEMENT,
        WEB_DEVELOPMENT,
    };

    fn ids(raw: &[&str]) -> Vec<TrackId> {
        raw.iter().copied().map(TrackId::new).collect()
    }

    #[test]
    fn default_record_matches_seed_values() {
        let record = UserProgression::new();
        assert_eq!(record.level(), 1);
        assert_eq!(record.xp(), 0);
        assert_eq!(record.xp_threshold(), 1000);
        assert_eq!(record.progress_percent(), 0);
        assert!(!record.assessment_completed());
        assert!(record.recommended_track_ids().is_empty());
        assert_eq!(record.tracks().len(), 6);
    }

    #[test]
    fn add_xp_levels_up_with_surplus() {
        let mut record = UserProgression::new();
        let gain = record.add_xp(1200);
        assert_eq!((record.level(), record.xp(), record.xp_threshold()), (2, 200, 1500));
        assert_eq!(gain, XpGain { awarded: 1200, levels_gained: 1, level: 2 });
        assert!(gain.leveled_up());
    }

    #[test]
    fn add_xp_spanning_two_levels() {
        let mut record = UserProgression::new();
        let gain = record.add_xp(3500);
        assert_eq!((record.level(), record.xp(), record.xp_threshold()), (3, 1000, 2250));
        assert_eq!(gain.levels_gained, 2);
    }

    #[test]
    fn progress_percent_is_derived() {
        let mut record = UserProgression::new();
        record.add_xp(250);
        assert_eq!(record.progress_percent(), 25);
    }

    #[test]
    fn complete_track_awards_completion_xp() {
        let mut record = UserProgression::new();
        record.update_track_progress(FREELANCE_WRITING, 40).unwrap();

        let gain = record.complete_track(FREELANCE_WRITING).unwrap();

        let track = record.track(FREELANCE_WRITING).unwrap();
        assert_eq!(track.progress_percent(), 100);
        assert!(track.is_completed());
        assert_eq!(gain.awarded, 500);
        assert_eq!(record.xp(), 500);
    }

    #[test]
    fn complete_track_can_trigger_level_up() {
        let mut record = UserProgression::new();
        record.add_xp(700);
        let gain = record.complete_track(ONLINE_TUTORING).unwrap();
        assert!(gain.leveled_up());
        assert_eq!((record.level(), record.xp()), (2, 200));
    }

    #[test]
    fn unknown_track_is_rejected_without_changes() {
        let mut record = UserProgression::new();
        let before = record.clone();

        let err = record.update_track_progress("not-a-real-id", 50).unwrap_err();
        assert_eq!(err, ProgressionError::TrackNotFound(TrackId::new("not-a-real-id")));
        assert_eq!(record, before);

        assert!(record.complete_track("not-a-real-id").is_err());
        assert_eq!(record, before);
    }

    #[test]
    fn track_progress_is_clamped_and_monotonic() {
        let mut record = UserProgression::new();
        assert_eq!(record.update_track_progress(GRAPHIC_DESIGN, 60).unwrap(), 60);
        assert_eq!(record.update_track_progress(GRAPHIC_DESIGN, 20).unwrap(), 60);
        assert_eq!(record.update_track_progress(GRAPHIC_DESIGN, 200).unwrap(), 100);
        assert!(!record.track(GRAPHIC_DESIGN).unwrap().is_completed());
    }

    #[test]
    fn recommendations_drop_unknown_and_duplicates() {
        let mut record = UserProgression::new();
        let dropped = record.set_recommended_tracks(ids(&[
            FREELANCE_WRITING,
            "content-creation",
            ONLINE_TUTORING,
            FREELANCE_WRITING,
        ]));
        assert_eq!(record.recommended_track_ids(), ids(&[FREELANCE_WRITING, ONLINE_TUTORING]));
        assert_eq!(dropped, ids(&["content-creation", FREELANCE_WRITING]));
    }

    #[test]
    fn recommended_unlocked_respects_level_and_order() {
        let mut record = UserProgression::new();
        record.set_recommended_tracks(ids(&[WEB_DEVELOPMENT, ONLINE_TUTORING, SOCIAL_MEDIA_MANAGEMENT]));

        let visible: Vec<_> = record.recommended_unlocked().iter().map(|t| t.id().clone()).collect();
        assert_eq!(visible, ids(&[ONLINE_TUTORING]));

        record.add_xp(1000);
        let visible: Vec<_> = record.recommended_unlocked().iter().map(|t| t.id().clone()).collect();
        assert_eq!(visible, ids(&[ONLINE_TUTORING, SOCIAL_MEDIA_MANAGEMENT]));
    }

    #[test]
    fn filter_by_tab_and_level() {
        let mut record = UserProgression::new();
        record.update_track_progress(FREELANCE_WRITING, 50).unwrap();
        record.complete_track(ONLINE_TUTORING).unwrap();
        record.set_recommended_tracks(ids(&[GRAPHIC_DESIGN]));

        let in_progress = record.filter(TrackFilter::InProgress, None);
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id(), &TrackId::new(FREELANCE_WRITING));

        let completed = record.filter(TrackFilter::Completed, None);
        assert_eq!(completed[0].id(), &TrackId::new(ONLINE_TUTORING));

        assert_eq!(record.filter(TrackFilter::Recommended, None).len(), 1);
        assert_eq!(record.filter(TrackFilter::All, Some(2)).len(), 2);
        assert_eq!(record.filter(TrackFilter::All, None).len(), 6);
    }

    #[test]
    fn from_persisted_normalizes_pending_level_up() {
        let record = UserProgression::from_persisted(
            1,
            1200,
            1000,
            catalog::default_tracks(),
            true,
            ids(&[FREELANCE_WRITING, "bogus"]),
        );
        assert_eq!((record.level(), record.xp(), record.xp_threshold()), (2, 200, 1500));
        assert_eq!(record.recommended_track_ids(), ids(&[FREELANCE_WRITING]));
        assert!(record.assessment_completed());
    }

    #[test]
    fn extra_stored_tracks_are_not_recommendable() {
        let mut tracks = catalog::default_tracks();
        tracks.push(Track::new(
            TrackId::new("pet-sitting"),
            "Pet Sitting",
            "Look after pets.",
            "$10-20/hr",
            "Flexible",
            crate::model::IconTag::Trophy,
            1,
        ));
        let mut record =
            UserProgression::from_persisted(1, 0, 1000, tracks, true, ids(&["pet-sitting"]));
        assert!(record.recommended_track_ids().is_empty());

        let dropped = record.set_recommended_tracks(ids(&["pet-sitting", FREELANCE_WRITING]));
        assert_eq!(dropped, ids(&["pet-sitting"]));
        assert_eq!(record.recommended_track_ids(), ids(&[FREELANCE_WRITING]));
        assert!(record.track("pet-sitting").is_some());
    }

    #[test]
    fn from_persisted_falls_back_to_catalog_when_tracks_missing() {
        let record = UserProgression::from_persisted(3, 10, 2250, Vec::new(), false, Vec::new());
        assert_eq!(record.tracks().len(), 6);
        assert_eq!(record.level(), 3);
    }
}
