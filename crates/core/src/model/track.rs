use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ids::TrackId;

//
// ─── ICONS ─────────────────────────────────────────────────────────────────────
//

/// Finite set of icon tags a track can carry.
///
/// The record stores the tag string; renderers map the variant to a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconTag {
    BookOpen,
    Briefcase,
    Clock,
    Code,
    Palette,
    GraduationCap,
    #[default]
    Trophy,
}

impl IconTag {
    pub const ALL: [IconTag; 7] = [
        IconTag::BookOpen,
        IconTag::Briefcase,
        IconTag::Clock,
        IconTag::Code,
        IconTag::Palette,
        IconTag::GraduationCap,
        IconTag::Trophy,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IconTag::BookOpen => "BookOpen",
            IconTag::Briefcase => "Briefcase",
            IconTag::Clock => "Clock",
            IconTag::Code => "Code",
            IconTag::Palette => "Palette",
            IconTag::GraduationCap => "GraduationCap",
            IconTag::Trophy => "Trophy",
        }
    }

    /// Lenient lookup: unknown tags fall back to `Trophy`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconTag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconTag::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .ok_or(())
    }
}

impl Serialize for IconTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IconTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(IconTag::from_tag(&tag))
    }
}

//
// ─── TRACK ─────────────────────────────────────────────────────────────────────
//

/// A learning track ("side hustle") with its static metadata and the
/// learner's progress through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    id: TrackId,
    title: String,
    description: String,
    earnings: String,
    time_commitment: String,
    icon: IconTag,
    unlock_level: u32,
    progress_percent: u8,
    completed: bool,
}

impl Track {
    /// Creates a track with no progress.
    #[must_use]
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        description: impl Into<String>,
        earnings: impl Into<String>,
        time_commitment: impl Into<String>,
        icon: IconTag,
        unlock_level: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            earnings: earnings.into(),
            time_commitment: time_commitment.into(),
            icon,
            unlock_level: unlock_level.max(1),
            progress_percent: 0,
            completed: false,
        }
    }

    /// Rehydrate a track from persisted values.
    ///
    /// Progress is clamped to 100, and a completed track is forced to 100.
    #[must_use]
    pub fn with_progress(mut self, progress_percent: u8, completed: bool) -> Self {
        self.progress_percent = if completed {
            100
        } else {
            progress_percent.min(100)
        };
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn id(&self) -> &TrackId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn earnings(&self) -> &str {
        &self.earnings
    }

    #[must_use]
    pub fn time_commitment(&self) -> &str {
        &self.time_commitment
    }

    #[must_use]
    pub fn icon(&self) -> IconTag {
        self.icon
    }

    #[must_use]
    pub fn unlock_level(&self) -> u32 {
        self.unlock_level
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// True when a learner at `level` may open this track.
    #[must_use]
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= self.unlock_level
    }

    /// Started but not yet at 100%.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.progress_percent > 0 && self.progress_percent < 100
    }

    /// Reached 100%, whether through completion or incremental progress.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress_percent == 100
    }

    /// Raise progress to `percent` (clamped to 100). Never lowers it.
    ///
    /// Returns the resulting progress.
    pub(crate) fn raise_progress(&mut self, percent: u8) -> u8 {
        self.progress_percent = self.progress_percent.max(percent.min(100));
        self.progress_percent
    }

    pub(crate) fn mark_completed(&mut self) {
        self.progress_percent = 100;
        self.completed = true;
    }
}

//
// ─── FILTERS ───────────────────────────────────────────────────────────────────
//

/// Listing filters offered by the track browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackFilter {
    #[default]
    All,
    InProgress,
    Completed,
    Recommended,
}

impl FromStr for TrackFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "inprogress" | "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "recommended" => Ok(Self::Recommended),
            other => Err(format!("unknown track filter: {other}")),
        }
    }
}
