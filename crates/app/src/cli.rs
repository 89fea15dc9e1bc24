//! Command-line surface of the `hustleup` binary.

use clap::{Parser, Subcommand};
use hustle_core::model::TrackFilter;

pub const DEFAULT_DB_URL: &str = "sqlite://hustleup.sqlite3";

#[derive(Parser)]
#[command(name = "hustleup")]
#[command(about = "Level up by learning side hustles", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// SQLite database holding the learner's progress
    #[arg(long, global = true, env = "HUSTLE_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show level, XP and track progress (default)
    Status,

    /// List tracks
    Tracks {
        /// all, in-progress, completed or recommended
        #[arg(long, default_value = "all")]
        filter: TrackFilter,

        /// Only tracks unlocked at exactly this level
        #[arg(long)]
        level: Option<u32>,
    },

    /// Answer the skills assessment and get recommendations
    Assess {
        /// less-than-5, 5-10, 10-20, 20-plus or flexible
        #[arg(long)]
        time: String,
        /// writing, design, tech, teaching or admin
        #[arg(long)]
        skills: String,
        /// extra-income, new-skills, transition, flexibility or passion
        #[arg(long)]
        goals: String,
        /// complete-beginner, some-experience, intermediate or advanced
        #[arg(long)]
        experience: String,
        /// independent, collaborative, structured or creative
        #[arg(long)]
        work_style: String,
    },

    /// Finish a track's lesson
    Lesson { track: String },

    /// Take a track's quiz
    Quiz {
        track: String,

        /// Option index (0-3) per question, e.g. 1,2,1,1,0
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<usize>,
    },

    /// Mark a track mastered
    Complete { track: String },
}
