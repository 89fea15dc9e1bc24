pub mod catalog;
mod ids;
mod progression;
mod track;

pub use ids::{ParseIdError, TrackId};

pub use catalog::{CatalogEntry, display_icon, display_title};
pub use progression::{ProgressionError, UserProgression, XpGain};
pub use track::{IconTag, Track, TrackFilter};
