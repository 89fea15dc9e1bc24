mod cli;

use std::fmt;

use clap::Parser;
use hustle_core::model::{Track, TrackFilter, TrackId, display_title};
use hustle_core::quiz::questions_for;
use services::{
    AppServices, AssessmentFlow, QuizSession, QuizStep, UserStateStore, complete_lesson,
    master_track,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    AnswerCount { track: String, expected: usize, got: usize },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::AnswerCount {
                track,
                expected,
                got,
            } => write!(f, "the {track} quiz has {expected} questions, got {got} answers"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn is_memory_url(db_url: &str) -> bool {
    db_url == "sqlite::memory:" || db_url.contains("mode=memory")
}

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_memory_url(trimmed) || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if is_memory_url(db_url) {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn parse_track(raw: &str) -> Result<TrackId, hustle_core::Error> {
    Ok(raw.parse::<TrackId>()?)
}

/// Walk the questionnaire in order, one answer per question.
fn fill_assessment(values: [&str; 5]) -> Result<AssessmentFlow, hustle_core::Error> {
    let mut flow = AssessmentFlow::new();
    for value in values {
        flow.answer(value)?;
        flow.next()?;
    }
    Ok(flow)
}

fn print_track(store: &UserStateStore, track: &Track) {
    let state = if !track.is_unlocked(store.level()) {
        format!("locked until level {}", track.unlock_level())
    } else if track.is_completed() {
        "completed".to_string()
    } else {
        format!("{}%", track.progress_percent())
    };
    println!(
        "  {:<24} {:<14} {:<10} [{}] {}",
        track.id(),
        track.earnings(),
        track.icon().as_str(),
        state,
        track.title()
    );
}

fn print_status(store: &UserStateStore) {
    println!(
        "Level {} | {}/{} XP ({}%)",
        store.level(),
        store.xp(),
        store.xp_threshold(),
        store.progress_percent()
    );

    let state = store.snapshot();
    if !store.assessment_completed() {
        println!("Take the assessment to get personalized recommendations.");
    } else {
        let recommended = state.recommended_unlocked();
        if recommended.is_empty() {
            println!("No unlocked recommendations yet.");
        } else {
            println!("Recommended for you:");
            for track in recommended {
                print_track(store, track);
            }
        }
    }

    let in_progress: Vec<&Track> = state.in_progress().collect();
    if !in_progress.is_empty() {
        println!("In progress:");
        for track in in_progress {
            print_track(store, track);
        }
    }

    let finished: Vec<&Track> = state.finished().collect();
    if !finished.is_empty() {
        println!("Completed:");
        for track in finished {
            print_track(store, track);
        }
    }
}

fn print_gain(gain: &hustle_core::model::XpGain) {
    if gain.leveled_up() {
        println!("+{} XP. Level up! You are now level {}.", gain.awarded, gain.level);
    } else {
        println!("+{} XP.", gain.awarded);
    }
}

async fn run_quiz(
    store: &mut UserStateStore,
    track: &TrackId,
    answers: &[usize],
) -> Result<(), Box<dyn std::error::Error>> {
    let expected = questions_for(track.as_str()).len();
    if answers.len() != expected {
        return Err(ArgsError::AnswerCount {
            track: track.to_string(),
            expected,
            got: answers.len(),
        }
        .into());
    }

    let mut session = QuizSession::start(store, track.as_str())?;
    for &pick in answers {
        let prompt = session.current().map(|question| question.prompt);
        let feedback = session.select(pick)?;
        if let Some(prompt) = prompt {
            let mark = if feedback.correct { "correct" } else { "wrong" };
            println!("{prompt} -> {mark}");
        }

        match session.advance(store).await? {
            QuizStep::Next { progress_percent } => debug!(progress_percent, "next question"),
            QuizStep::Finished { result, xp } => {
                println!(
                    "Score {}/{}. {}",
                    result.score,
                    result.total,
                    result.verdict.message()
                );
                if result.celebrate {
                    println!("Well done!");
                }
                print_gain(&xp);
            }
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.db.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: cli.db }.into());
    }
    let db_url = normalize_sqlite_url(&cli.db);

    // Opening and migrating the database is the binary's job; services only see the pool.
    prepare_sqlite_file(&db_url)?;
    let app = AppServices::new_sqlite(&db_url).await?;
    let mut store = app.user_state().await;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => print_status(&store),
        Command::Tracks { filter, level } => {
            let state = store.snapshot();
            let tracks = state.filter(filter, level);
            if tracks.is_empty() && filter == TrackFilter::Recommended {
                println!("No recommendations yet. Run `hustleup assess` first.");
            }
            for track in tracks {
                print_track(&store, track);
            }
        }
        Command::Assess {
            time,
            skills,
            goals,
            experience,
            work_style,
        } => {
            let flow = fill_assessment([
                time.as_str(),
                skills.as_str(),
                goals.as_str(),
                experience.as_str(),
                work_style.as_str(),
            ])?;
            let outcome = flow.finish(&mut store).await?;
            println!("Your best matches:");
            for id in &outcome.suggested {
                let stored = outcome.recommended.contains(id);
                let note = if stored { "" } else { " (coming soon)" };
                println!("  {}{note}", display_title(id.as_str()));
            }
            print_gain(&outcome.xp);
        }
        Command::Lesson { track } => {
            let track = parse_track(&track)?;
            let outcome = complete_lesson(&mut store, track.as_str()).await?;
            println!(
                "Lesson done. {} is at {}%.",
                display_title(track.as_str()),
                outcome.progress_percent
            );
            print_gain(&outcome.xp);
        }
        Command::Quiz { track, answers } => {
            let track = parse_track(&track)?;
            run_quiz(&mut store, &track, &answers).await?;
        }
        Command::Complete { track } => {
            let track = parse_track(&track)?;
            let gain = master_track(&mut store, track.as_str()).await?;
            println!("{} mastered!", display_title(track.as_str()));
            print_gain(&gain);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Errors are reported once, here.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/progress.sqlite3");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/progress.sqlite3"));
    }

    #[test]
    fn memory_and_absolute_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:file:memdb_cli?mode=memory&cache=shared"),
            "sqlite:file:memdb_cli?mode=memory&cache=shared"
        );
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/x.db"), "sqlite:///tmp/x.db");
    }

    #[test]
    fn track_ids_are_validated() {
        assert!(parse_track("graphic-design").is_ok());
        assert!(matches!(
            parse_track("Graphic Design"),
            Err(hustle_core::Error::TrackId(_))
        ));
    }

    #[test]
    fn assessment_answers_follow_question_order() {
        let flow = fill_assessment(["5-10", "tech", "new-skills", "complete-beginner", "mixed"]);
        assert!(matches!(flow, Err(hustle_core::Error::Assessment(_))));

        let flow =
            fill_assessment(["5-10", "tech", "new-skills", "complete-beginner", "independent"])
                .unwrap();
        assert!(flow.draft().is_complete());
    }
}
