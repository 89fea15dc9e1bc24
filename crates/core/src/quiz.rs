//! Per-track multiple-choice quizzes and their scoring.

use thiserror::Error;

use crate::leveling::{QUIZ_MAX_XP, rounded_percent, rounded_share};
use crate::model::TrackId;
use crate::model::catalog::{
    FREELANCE_WRITING, GRAPHIC_DESIGN, ONLINE_TUTORING, SOCIAL_MEDIA_MANAGEMENT,
    VIRTUAL_ASSISTANT,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {question} already has an answer")]
    AlreadyAnswered { question: usize },

    #[error("option {option} is out of range for a question with {options} options")]
    OptionOutOfRange { option: usize, options: usize },

    #[error("question {question} has not been answered")]
    Unanswered { question: usize },

    #[error("quiz already finished")]
    Finished,
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub prompt: &'static str,
    pub options: [&'static str; 4],
    pub correct: usize,
}

const fn q(prompt: &'static str, options: [&'static str; 4], correct: usize) -> QuizQuestion {
    QuizQuestion {
        prompt,
        options,
        correct,
    }
}

static FREELANCE_WRITING_QUIZ: [QuizQuestion; 5] = [
    q("What's a key benefit of freelance writing?", ["Fixed salary", "Flexible schedule", "Company benefits", "Office space"], 1),
    q("Which platform is commonly used by freelance writers to find work?", ["Instagram", "TikTok", "Upwork", "Snapchat"], 2),
    q("What's an important skill for freelance writers?", ["Video editing", "Research abilities", "Coding", "Public speaking"], 1),
    q("What type of writing typically pays the most?", ["Blog posts", "Technical writing", "Poetry", "Fiction"], 1),
    q("What should you create to showcase your writing skills to potential clients?", ["A portfolio", "A resume only", "A business card", "A social media account"], 0),
];

static SOCIAL_MEDIA_QUIZ: [QuizQuestion; 5] = [
    q("Which tool is commonly used for scheduling social media posts?", ["Microsoft Word", "Hootsuite", "Photoshop", "Excel"], 1),
    q("What's a key metric to track for social media success?", ["Number of posts", "Engagement rate", "Post length", "Number of hashtags"], 1),
    q("What's the best time to post on social media?", ["Midnight", "When your audience is most active", "Early morning only", "Weekends only"], 1),
    q("Which platform is best for B2B marketing?", ["TikTok", "LinkedIn", "Snapchat", "Pinterest"], 1),
    q("What's a social media calendar used for?", ["Tracking holidays", "Planning content in advance", "Scheduling meetings", "Tracking expenses"], 1),
];

static VIRTUAL_ASSISTANT_QUIZ: [QuizQuestion; 5] = [
    q("What's a common task for virtual assistants?", ["Physical office cleaning", "Email management", "In-person meetings", "Equipment repair"], 1),
    q("Which tool is useful for scheduling meetings as a VA?", ["Instagram", "Calendly", "TikTok", "Snapchat"], 1),
    q("What's an important skill for virtual assistants?", ["Physical strength", "Time management", "Cooking", "Driving"], 1),
    q("How do most virtual assistants communicate with clients?", ["In-person meetings", "Email and video calls", "Postal mail", "Fax"], 1),
    q("What's a benefit of being a virtual assistant?", ["Company car", "Working from anywhere", "Free lunch", "Corner office"], 1),
];

static ONLINE_TUTORING_QUIZ: [QuizQuestion; 5] = [
    q("What platform is commonly used for online tutoring?", ["TikTok", "Zoom", "Snapchat", "Pinterest"], 1),
    q("What's an important quality for an online tutor?", ["Being strict", "Patience", "Speaking quickly", "Assigning lots of homework"], 1),
    q("How can you make online tutoring sessions more engaging?", ["Lecture for the entire time", "Use interactive tools", "No breaks", "No visuals"], 1),
    q("What should you do before your first tutoring session?", ["Nothing, just wing it", "Prepare and plan your lesson", "Call the student repeatedly", "Send a long email"], 1),
    q("What's a good way to track student progress?", ["Memory", "Regular assessments", "Ask parents", "Social media"], 1),
];

static GRAPHIC_DESIGN_QUIZ: [QuizQuestion; 5] = [
    q("Which software is commonly used by graphic designers?", ["Microsoft Word", "Adobe Photoshop", "Excel", "Notepad"], 1),
    q("What file format is best for logos with transparency?", ["JPG", "PNG", "BMP", "DOC"], 1),
    q("What's an important principle in graphic design?", ["Using as many fonts as possible", "Balance", "Using only black and white", "Making text as small as possible"], 1),
    q("What should a graphic designer create to showcase their work?", ["A resume only", "A portfolio", "A business card only", "A social media account only"], 1),
    q("What's the color mode used for digital designs?", ["CMYK", "RGB", "HSL", "PMS"], 1),
];

static GENERIC_QUIZ: [QuizQuestion; 5] = [
    q("What's the best way to start this side hustle?", ["Quit your job immediately", "Start small while keeping your job", "Borrow money", "Buy expensive equipment"], 1),
    q("How much can beginners typically earn?", ["Millions right away", "Nothing for years", "Small amounts that grow with experience", "Exactly $1000/month"], 2),
    q("What's a good way to find clients?", ["Wait for them to find you", "Networking and online platforms", "Cold calling only", "Newspaper ads"], 1),
    q("How important is having a portfolio?", ["Not important", "Very important", "Only for certain jobs", "Only after 5 years"], 1),
    q("What's the best pricing strategy when starting out?", ["Charge as much as possible", "Work for free forever", "Competitive rates that reflect your experience", "Random prices"], 2),
];

/// Question set for a track; ids without a dedicated set get the generic one.
#[must_use]
pub fn questions_for(track: &str) -> &'static [QuizQuestion] {
    match track {
        FREELANCE_WRITING => &FREELANCE_WRITING_QUIZ,
        SOCIAL_MEDIA_MANAGEMENT => &SOCIAL_MEDIA_QUIZ,
        VIRTUAL_ASSISTANT => &VIRTUAL_ASSISTANT_QUIZ,
        ONLINE_TUTORING => &ONLINE_TUTORING_QUIZ,
        GRAPHIC_DESIGN => &GRAPHIC_DESIGN_QUIZ,
        _ => &GENERIC_QUIZ,
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Feedback tier shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 80% or better.
    Outstanding,
    /// 60% or better.
    Solid,
    KeepPracticing,
}

impl Verdict {
    #[must_use]
    pub fn for_score(score: u32, total: u32) -> Self {
        // score / total >= 0.8  <=>  5 * score >= 4 * total
        if total > 0 && 5 * score >= 4 * total {
            Verdict::Outstanding
        } else if total > 0 && 5 * score >= 3 * total {
            Verdict::Solid
        } else {
            Verdict::KeepPracticing
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Outstanding => "Amazing job! You're a natural!",
            Verdict::Solid => "Great work! You're getting the hang of it!",
            Verdict::KeepPracticing => "Good effort! Keep learning and try again!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    /// `round(score / total * 200)`.
    pub xp: u32,
    pub verdict: Verdict,
    /// Whether the score earns a celebration (60% or better).
    pub celebrate: bool,
}

impl QuizResult {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        let verdict = Verdict::for_score(score, total);
        Self {
            score,
            total,
            xp: rounded_share(score, total, QUIZ_MAX_XP),
            verdict,
            celebrate: matches!(verdict, Verdict::Outstanding | Verdict::Solid),
        }
    }
}

/// Feedback after locking in an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_option: usize,
}

/// Outcome of moving past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// More questions remain; progress is `round(answered / total * 100)`.
    Next { progress_percent: u8 },
    /// Last question answered; progress is 100.
    Finished {
        progress_percent: u8,
        result: QuizResult,
    },
}

impl Advance {
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        match self {
            Advance::Next { progress_percent } | Advance::Finished { progress_percent, .. } => {
                *progress_percent
            }
        }
    }
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// A single pass through a track's quiz. One answer per question, no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    track: TrackId,
    questions: &'static [QuizQuestion],
    cursor: usize,
    selected: Option<usize>,
    score: u32,
    finished: bool,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(track: TrackId) -> Self {
        let questions = questions_for(track.as_str());
        Self {
            track,
            questions,
            cursor: 0,
            selected: None,
            score: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn track(&self) -> &TrackId {
        &self.track
    }

    #[must_use]
    pub fn current(&self) -> Option<&'static QuizQuestion> {
        if self.finished {
            None
        } else {
            self.questions.get(self.cursor)
        }
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Lock in an option for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` after the last question,
    /// `QuizError::AlreadyAnswered` on a second pick and
    /// `QuizError::OptionOutOfRange` for an index past the options.
    pub fn select(&mut self, option: usize) -> Result<AnswerFeedback, QuizError> {
        let question = self.current().ok_or(QuizError::Finished)?;
        if self.selected.is_some() {
            return Err(QuizError::AlreadyAnswered {
                question: self.cursor,
            });
        }
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                option,
                options: question.options.len(),
            });
        }

        self.selected = Some(option);
        let correct = option == question.correct;
        if correct {
            self.score += 1;
        }
        Ok(AnswerFeedback {
            correct,
            correct_option: question.correct,
        })
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished` after the last question and
    /// `QuizError::Unanswered` if no option was selected.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        if self.selected.is_none() {
            return Err(QuizError::Unanswered {
                question: self.cursor,
            });
        }

        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let answered = u32::try_from(self.cursor + 1).unwrap_or(u32::MAX);
        let progress_percent = rounded_percent(answered, total);

        if self.cursor + 1 >= self.questions.len() {
            self.finished = true;
            return Ok(Advance::Finished {
                progress_percent,
                result: QuizResult::new(self.score, total),
            });
        }

        self.cursor += 1;
        self.selected = None;
        Ok(Advance::Next { progress_percent })
    }
}
