//! Built-in track catalog seeded on first run.

use crate::model::ids::TrackId;
use crate::model::track::{IconTag, Track};

/// Static description of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub earnings: &'static str,
    pub time_commitment: &'static str,
    pub icon: IconTag,
    pub unlock_level: u32,
}

impl CatalogEntry {
    #[must_use]
    pub fn to_track(&self) -> Track {
        Track::new(
            TrackId::new(self.id),
            self.title,
            self.description,
            self.earnings,
            self.time_commitment,
            self.icon,
            self.unlock_level,
        )
    }
}

pub const FREELANCE_WRITING: &str = "freelance-writing";
pub const SOCIAL_MEDIA_MANAGEMENT: &str = "social-media-management";
pub const VIRTUAL_ASSISTANT: &str = "virtual-assistant";
pub const WEB_DEVELOPMENT: &str = "web-development";
pub const GRAPHIC_DESIGN: &str = "graphic-design";
pub const ONLINE_TUTORING: &str = "online-tutoring";

/// Suggested by the recommendation rules but not part of the catalog.
pub const CONTENT_CREATION: &str = "content-creation";

pub static CATALOG: [CatalogEntry; 6] = [
    CatalogEntry {
        id: FREELANCE_WRITING,
        title: "Freelance Writing",
        description: "Create content for blogs, websites, and businesses.",
        earnings: "$15-50/hr",
        time_commitment: "Flexible",
        icon: IconTag::BookOpen,
        unlock_level: 1,
    },
    CatalogEntry {
        id: SOCIAL_MEDIA_MANAGEMENT,
        title: "Social Media Management",
        description: "Manage social accounts for small businesses.",
        earnings: "$20-35/hr",
        time_commitment: "10-15 hrs/week",
        icon: IconTag::Briefcase,
        unlock_level: 2,
    },
    CatalogEntry {
        id: VIRTUAL_ASSISTANT,
        title: "Virtual Assistant",
        description: "Provide administrative support remotely.",
        earnings: "$15-30/hr",
        time_commitment: "Flexible",
        icon: IconTag::Clock,
        unlock_level: 2,
    },
    CatalogEntry {
        id: WEB_DEVELOPMENT,
        title: "Web Development",
        description: "Build websites and web applications for clients.",
        earnings: "$25-75/hr",
        time_commitment: "Project-based",
        icon: IconTag::Code,
        unlock_level: 4,
    },
    CatalogEntry {
        id: GRAPHIC_DESIGN,
        title: "Graphic Design",
        description: "Create visual content for brands and businesses.",
        earnings: "$20-50/hr",
        time_commitment: "Project-based",
        icon: IconTag::Palette,
        unlock_level: 3,
    },
    CatalogEntry {
        id: ONLINE_TUTORING,
        title: "Online Tutoring",
        description: "Teach subjects you're knowledgeable about.",
        earnings: "$15-40/hr",
        time_commitment: "5-15 hrs/week",
        icon: IconTag::GraduationCap,
        unlock_level: 1,
    },
];

/// Fresh copies of every catalog track, in catalog order.
#[must_use]
pub fn default_tracks() -> Vec<Track> {
    CATALOG.iter().map(CatalogEntry::to_track).collect()
}

#[must_use]
pub fn entry(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

#[must_use]
pub fn contains(id: &str) -> bool {
    entry(id).is_some()
}

/// Human title for any track id, including ids outside the catalog.
#[must_use]
pub fn display_title(id: &str) -> String {
    if let Some(entry) = entry(id) {
        return entry.title.to_owned();
    }
    if id == CONTENT_CREATION {
        return "Content Creation".to_owned();
    }
    id.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Icon for any track id; off-catalog ids get `BookOpen` or `Trophy`.
#[must_use]
pub fn display_icon(id: &str) -> IconTag {
    match entry(id) {
        Some(entry) => entry.icon,
        None if id == CONTENT_CREATION => IconTag::BookOpen,
        None => IconTag::Trophy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_six_unique_ids() {
        let ids: HashSet<_> = CATALOG.iter().map(|entry| entry.id).collect();
        assert_eq!(ids.len(), 6);
        assert!(!contains(CONTENT_CREATION));
    }

    #[test]
    fn default_tracks_start_untouched() {
        let tracks = default_tracks();
        assert_eq!(tracks.len(), 6);
        assert!(tracks.iter().all(|t| t.progress_percent() == 0 && !t.is_completed()));
        assert_eq!(tracks[3].id(), &TrackId::new(WEB_DEVELOPMENT));
        assert_eq!(tracks[3].unlock_level(), 4);
    }

    #[test]
    fn display_title_prefers_catalog_then_title_cases() {
        assert_eq!(display_title(GRAPHIC_DESIGN), "Graphic Design");
        assert_eq!(display_title(CONTENT_CREATION), "Content Creation");
        assert_eq!(display_title("pet-sitting"), "Pet Sitting");
    }

    #[test]
    fn display_icon_falls_back() {
        assert_eq!(display_icon(WEB_DEVELOPMENT), IconTag::Code);
        assert_eq!(display_icon(CONTENT_CREATION), IconTag::BookOpen);
        assert_eq!(display_icon("dog-walking"), IconTag::Trophy);
    }
}
