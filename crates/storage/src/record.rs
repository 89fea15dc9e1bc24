//! Persisted JSON layout of the progression record.
//!
//! Every field is optional on read: anything missing, `null`, zero where
//! zero is meaningless, or negative falls back to the seed value.

use hustle_core::leveling::{STARTING_LEVEL, STARTING_XP_THRESHOLD};
use hustle_core::model::{IconTag, Track, TrackId, UserProgression};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// Slot key the progression record lives under.
pub const USER_STATE_KEY: &str = "hustleUpUser";

/// Persisted shape of a single track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unlock level.
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub earnings: String,
    #[serde(default)]
    pub time_commitment: String,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub icon: String,
}

impl TrackRecord {
    #[must_use]
    pub fn from_track(track: &Track) -> Self {
        Self {
            id: track.id().to_string(),
            title: track.title().to_owned(),
            description: track.description().to_owned(),
            level: Some(i64::from(track.unlock_level())),
            earnings: track.earnings().to_owned(),
            time_commitment: track.time_commitment().to_owned(),
            progress: Some(i64::from(track.progress_percent())),
            completed: track.is_completed(),
            icon: track.icon().as_str().to_owned(),
        }
    }

    #[must_use]
    pub fn into_track(self) -> Track {
        let unlock_level = self
            .level
            .and_then(|level| u32::try_from(level).ok())
            .filter(|level| *level > 0)
            .unwrap_or(STARTING_LEVEL);
        let progress = self
            .progress
            .map_or(0, |value| u8::try_from(value.clamp(0, 100)).unwrap_or(0));

        Track::new(
            TrackId::new(self.id),
            self.title,
            self.description,
            self.earnings,
            self.time_commitment,
            IconTag::from_tag(&self.icon),
            unlock_level,
        )
        .with_progress(progress, self.completed)
    }
}

/// Persisted shape of the whole progression record.
///
/// `progress` is derived and stored only for readers of the raw slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStateRecord {
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub xp: Option<i64>,
    #[serde(default)]
    pub max_xp: Option<i64>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub side_hustles: Option<Vec<TrackRecord>>,
    #[serde(default)]
    pub assessment_completed: Option<bool>,
    #[serde(default)]
    pub recommended_hustles: Option<Vec<String>>,
}

impl UserStateRecord {
    #[must_use]
    pub fn from_progression(state: &UserProgression) -> Self {
        Self {
            level: Some(i64::from(state.level())),
            xp: Some(i64::try_from(state.xp()).unwrap_or(i64::MAX)),
            max_xp: Some(i64::try_from(state.xp_threshold()).unwrap_or(i64::MAX)),
            progress: Some(i64::from(state.progress_percent())),
            side_hustles: Some(state.tracks().iter().map(TrackRecord::from_track).collect()),
            assessment_completed: Some(state.assessment_completed()),
            recommended_hustles: Some(
                state
                    .recommended_track_ids()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
        }
    }

    /// Convert into the domain record, filling gaps with seed values.
    #[must_use]
    pub fn into_progression(self) -> UserProgression {
        let level = positive(self.level)
            .and_then(|level| u32::try_from(level).ok())
            .unwrap_or(STARTING_LEVEL);
        let xp = self
            .xp
            .and_then(|xp| u64::try_from(xp).ok())
            .unwrap_or(0);
        // No sequence of level-ups produces a threshold below the starting one.
        let xp_threshold = self
            .max_xp
            .and_then(|max| u64::try_from(max).ok())
            .filter(|max| *max >= u64::from(STARTING_XP_THRESHOLD))
            .unwrap_or_else(|| u64::from(STARTING_XP_THRESHOLD));
        let tracks = self
            .side_hustles
            .map(|tracks| tracks.into_iter().map(TrackRecord::into_track).collect())
            .unwrap_or_default();
        let recommended = self
            .recommended_hustles
            .unwrap_or_default()
            .into_iter()
            .map(TrackId::new)
            .collect();

        UserProgression::from_persisted(
            level,
            xp,
            xp_threshold,
            tracks,
            self.assessment_completed.unwrap_or(false),
            recommended,
        )
    }

    /// Serialize to the slot's JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Parse the slot's JSON text.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the text is not a JSON
    /// object of the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

fn positive(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_round_trips() {
        let state = UserProgression::new();
        let json = UserStateRecord::from_progression(&state).to_json().unwrap();
        let restored = UserStateRecord::from_json(&json).unwrap().into_progression();
        assert_eq!(restored, state);
    }

    #[test]
    fn progressed_record_round_trips() {
        let mut state = UserProgression::new();
        state.add_xp(1700);
        state.update_track_progress("graphic-design", 60).unwrap();
        state.complete_track("online-tutoring").unwrap();
        state.set_assessment_completed(true);
        state.set_recommended_tracks([
            TrackId::new("online-tutoring"),
            TrackId::new("freelance-writing"),
        ]);

        let json = UserStateRecord::from_progression(&state).to_json().unwrap();
        let restored = UserStateRecord::from_json(&json).unwrap().into_progression();
        assert_eq!(restored, state);
    }

    #[test]
    fn writes_the_documented_field_names() {
        let json = UserStateRecord::from_progression(&UserProgression::new())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "level",
            "xp",
            "maxXp",
            "progress",
            "sideHustles",
            "assessmentCompleted",
            "recommendedHustles",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let first = &value["sideHustles"][0];
        assert_eq!(first["id"], "freelance-writing");
        assert_eq!(first["timeCommitment"], "Flexible");
        assert_eq!(first["icon"], "BookOpen");
        assert_eq!(first["level"], 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let state = UserStateRecord::from_json("{}").unwrap().into_progression();
        assert_eq!(state, UserProgression::new());
    }

    #[test]
    fn zero_and_negative_values_fall_back() {
        let state = UserStateRecord::from_json(r#"{"level":0,"xp":-5,"maxXp":0,"progress":40}"#)
            .unwrap()
            .into_progression();
        assert_eq!(state.level(), 1);
        assert_eq!(state.xp(), 0);
        assert_eq!(state.xp_threshold(), 1000);
        assert_eq!(state.progress_percent(), 0);
    }

    #[test]
    fn undersized_threshold_is_replaced_before_leveling() {
        let raw = format!(r#"{{"xp":{},"maxXp":1}}"#, i64::MAX);
        let state = UserStateRecord::from_json(&raw).unwrap().into_progression();
        assert!(state.xp() < state.xp_threshold());
        assert!(state.xp_threshold() >= 1000);
        assert!(state.level() < 128, "level {}", state.level());

        let state = UserStateRecord::from_json(r#"{"xp":1500,"maxXp":999}"#)
            .unwrap()
            .into_progression();
        assert_eq!((state.level(), state.xp(), state.xp_threshold()), (2, 500, 1500));
    }

    #[test]
    fn stored_progress_is_rederived() {
        let state = UserStateRecord::from_json(r#"{"xp":500,"progress":3}"#)
            .unwrap()
            .into_progression();
        assert_eq!(state.progress_percent(), 50);
    }

    #[test]
    fn track_with_unknown_icon_and_overflow_progress_is_repaired() {
        let raw = r#"{"sideHustles":[{"id":"pet-sitting","title":"Pet Sitting","level":0,"progress":140,"icon":"Dog"}]}"#;
        let state = UserStateRecord::from_json(raw).unwrap().into_progression();
        let track = state.track("pet-sitting").unwrap();
        assert_eq!(track.progress_percent(), 100);
        assert_eq!(track.unlock_level(), 1);
        assert_eq!(track.icon(), IconTag::Trophy);
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let err = UserStateRecord::from_json("not json").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
