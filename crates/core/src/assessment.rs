//! Onboarding questionnaire: question catalog, answer sheet and the
//! transient cursor used while the learner walks through it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("unknown question key: {0}")]
    UnknownQuestion(String),

    #[error("{value:?} is not an option for question {key}")]
    UnknownOption { key: QuestionKey, value: String },

    #[error("question {0} has not been answered")]
    Unanswered(QuestionKey),

    #[error("assessment has unanswered questions")]
    Incomplete,
}

//
// ─── QUESTION KEYS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKey {
    Time,
    Skills,
    Goals,
    Experience,
    WorkStyle,
}

impl QuestionKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKey::Time => "time",
            QuestionKey::Skills => "skills",
            QuestionKey::Goals => "goals",
            QuestionKey::Experience => "experience",
            QuestionKey::WorkStyle => "work-style",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKey {
    type Err = AssessmentError;

    /// The work-style key is accepted in kebab, snake and camel case so that
    /// every producer of answers lands on the same key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(QuestionKey::Time),
            "skills" => Ok(QuestionKey::Skills),
            "goals" => Ok(QuestionKey::Goals),
            "experience" => Ok(QuestionKey::Experience),
            "work-style" | "work_style" | "workStyle" => Ok(QuestionKey::WorkStyle),
            other => Err(AssessmentError::UnknownQuestion(other.to_owned())),
        }
    }
}

//
// ─── QUESTION CATALOG ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub description: &'static str,
    pub options: &'static [AnswerOption],
}

impl Question {
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&'static AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

const fn opt(value: &'static str, label: &'static str, description: &'static str) -> AnswerOption {
    AnswerOption {
        value,
        label,
        description,
    }
}

/// The questionnaire, in the order it is presented.
pub static QUESTIONS: [Question; 5] = [
    Question {
        key: QuestionKey::Time,
        prompt: "How much time can you commit to a side hustle each week?",
        description: "Be realistic about your availability to ensure sustainable success.",
        options: &[
            opt("less-than-5", "Less than 5 hours", "Perfect for beginners or those with limited time"),
            opt("5-10", "5-10 hours", "Good balance for most side hustles"),
            opt("10-20", "10-20 hours", "For more serious side hustlers"),
            opt("20-plus", "20+ hours", "For those looking to transition to full-time"),
            opt("flexible", "Flexible/Varies", "For those with irregular schedules"),
        ],
    },
    Question {
        key: QuestionKey::Skills,
        prompt: "What skills are you most confident in?",
        description: "Choose the areas where you feel most comfortable.",
        options: &[
            opt("writing", "Writing & Communication", "Content creation, copywriting, editing"),
            opt("design", "Visual & Design", "Graphic design, UI/UX, photography"),
            opt("tech", "Technical & Development", "Coding, web development, data analysis"),
            opt("teaching", "Teaching & Coaching", "Tutoring, coaching, creating courses"),
            opt("admin", "Organization & Admin", "Virtual assistance, project management"),
        ],
    },
    Question {
        key: QuestionKey::Goals,
        prompt: "What's your primary goal with side hustling?",
        description: "Understanding your motivation will help us recommend the right opportunities.",
        options: &[
            opt("extra-income", "Extra Income", "Supplement your current income"),
            opt("new-skills", "Learn New Skills", "Develop marketable abilities"),
            opt("transition", "Career Transition", "Move toward a new career path"),
            opt("flexibility", "Work Flexibility", "Create a more flexible work arrangement"),
            opt("passion", "Pursue Passion", "Work on something you're passionate about"),
        ],
    },
    Question {
        key: QuestionKey::Experience,
        prompt: "What's your experience level with side hustles?",
        description: "This helps us tailor recommendations to your experience level.",
        options: &[
            opt("complete-beginner", "Complete Beginner", "Never done a side hustle before"),
            opt("some-experience", "Some Experience", "Tried a few things but not consistently"),
            opt("intermediate", "Intermediate", "Have been side hustling for a while"),
            opt("advanced", "Advanced", "Experienced and looking to expand"),
        ],
    },
    Question {
        key: QuestionKey::WorkStyle,
        prompt: "What's your preferred work style?",
        description: "Different side hustles suit different work preferences.",
        options: &[
            opt("independent", "Independent Work", "Work on your own terms and schedule"),
            opt("collaborative", "Collaborative", "Work with clients or team members"),
            opt("structured", "Structured", "Clear guidelines and expectations"),
            opt("creative", "Creative Freedom", "Express yourself and innovate"),
        ],
    },
];

#[must_use]
pub fn question(key: QuestionKey) -> &'static Question {
    QUESTIONS
        .iter()
        .find(|question| question.key == key)
        .unwrap_or(&QUESTIONS[0])
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// Answer sheet keyed by question. Values are free-form option strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers(BTreeMap<QuestionKey, String>);

impl Answers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: QuestionKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: QuestionKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    #[must_use]
    pub fn get(&self, key: QuestionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    /// True when `key` was answered with exactly `value`.
    #[must_use]
    pub fn is(&self, key: QuestionKey, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// True when `key` was answered with any of `values`.
    #[must_use]
    pub fn is_any(&self, key: QuestionKey, values: &[&str]) -> bool {
        self.get(key).is_some_and(|answer| values.contains(&answer))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `key=value` pairs, e.g. from a query string or CLI.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::UnknownQuestion` for an unrecognized key.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, AssessmentError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut answers = Self::new();
        for (key, value) in pairs {
            answers.set(key.parse()?, value);
        }
        Ok(answers)
    }
}

impl FromIterator<(QuestionKey, String)> for Answers {
    fn from_iter<T: IntoIterator<Item = (QuestionKey, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Result of moving forward in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Question(usize),
    Finished,
}

/// Transient, never-persisted walk through the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentDraft {
    cursor: usize,
    answers: Answers,
}

impl AssessmentDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> &'static Question {
        &QUESTIONS[self.cursor]
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total(&self) -> usize {
        QUESTIONS.len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == QUESTIONS.len()
    }

    #[must_use]
    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.answers.get(self.current().key)
    }

    /// Answer the current question, replacing any earlier answer.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::UnknownOption` if `value` is not one of the
    /// current question's options.
    pub fn answer(&mut self, value: &str) -> Result<(), AssessmentError> {
        let question = self.current();
        if question.option(value).is_none() {
            return Err(AssessmentError::UnknownOption {
                key: question.key,
                value: value.to_owned(),
            });
        }
        self.answers.set(question.key, value);
        Ok(())
    }

    /// Move to the next question, or report `Finished` after the last one.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Unanswered` if the current question has no
    /// answer yet.
    pub fn next(&mut self) -> Result<Step, AssessmentError> {
        if self.current_answer().is_none() {
            return Err(AssessmentError::Unanswered(self.current().key));
        }
        if self.is_last() {
            return Ok(Step::Finished);
        }
        self.cursor += 1;
        Ok(Step::Question(self.cursor))
    }

    /// Step back one question; stays put on the first.
    pub fn previous(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        QUESTIONS.iter().all(|q| self.answers.get(q.key).is_some())
    }

    /// Consume the draft once every question is answered.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Incomplete` if any question is unanswered.
    pub fn finish(self) -> Result<Answers, AssessmentError> {
        if !self.is_complete() {
            return Err(AssessmentError::Incomplete);
        }
        Ok(self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_keys_accept_work_style_spellings() {
        for raw in ["work-style", "work_style", "workStyle"] {
            assert_eq!(raw.parse::<QuestionKey>().unwrap(), QuestionKey::WorkStyle);
        }
        assert!("budget".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn answers_from_pairs() {
        let answers = Answers::from_pairs([("skills", "tech"), ("work_style", "creative")]).unwrap();
        assert!(answers.is(QuestionKey::Skills, "tech"));
        assert!(answers.is(QuestionKey::WorkStyle, "creative"));
        assert!(answers.is_any(QuestionKey::WorkStyle, &["structured", "creative"]));
        assert!(!answers.is(QuestionKey::Time, "5-10"));
    }

    #[test]
    fn draft_rejects_foreign_option() {
        let mut draft = AssessmentDraft::new();
        let err = draft.answer("tech").unwrap_err();
        assert_eq!(
            err,
            AssessmentError::UnknownOption {
                key: QuestionKey::Time,
                value: "tech".into()
            }
        );
    }

    #[test]
    fn draft_requires_answer_before_next() {
        let mut draft = AssessmentDraft::new();
        assert_eq!(draft.next(), Err(AssessmentError::Unanswered(QuestionKey::Time)));
        draft.answer("5-10").unwrap();
        assert_eq!(draft.next(), Ok(Step::Question(1)));
        assert_eq!(draft.current().key, QuestionKey::Skills);
    }

    #[test]
    fn draft_walks_to_finish_and_back() {
        let mut draft = AssessmentDraft::new();
        let picks = ["flexible", "design", "passion", "advanced", "creative"];
        for (i, pick) in picks.iter().enumerate() {
            draft.answer(pick).unwrap();
            let step = draft.next().unwrap();
            if i + 1 == picks.len() {
                assert_eq!(step, Step::Finished);
            }
        }
        assert_eq!(draft.position(), 4);
        assert_eq!(draft.previous(), 3);
        assert_eq!(draft.current_answer(), Some("advanced"));

        let answers = draft.finish().unwrap();
        assert_eq!(answers.len(), 5);
    }

    #[test]
    fn finish_rejects_partial_draft() {
        let mut draft = AssessmentDraft::new();
        draft.answer("5-10").unwrap();
        assert_eq!(draft.finish(), Err(AssessmentError::Incomplete));
    }

    #[test]
    fn previous_stays_on_first_question() {
        let mut draft = AssessmentDraft::new();
        assert_eq!(draft.previous(), 0);
    }
}
