//! Rule table mapping questionnaire answers to recommended tracks.
//!
//! Rules run in a fixed order and each appends at most one track id, so the
//! output order is the display order. Repeats are possible at this stage;
//! the progression record drops them when the list is stored.

use crate::assessment::{Answers, QuestionKey};
use crate::model::TrackId;
use crate::model::catalog::{
    CONTENT_CREATION, FREELANCE_WRITING, GRAPHIC_DESIGN, ONLINE_TUTORING,
    SOCIAL_MEDIA_MANAGEMENT, VIRTUAL_ASSISTANT, WEB_DEVELOPMENT,
};

/// Every answer set yields at least this many recommendations.
pub const MIN_RECOMMENDATIONS: usize = 2;

const LONG_HOURS: &[&str] = &["10-20", "20-plus"];
const SHORT_HOURS: &[&str] = &["less-than-5", "5-10", "flexible"];

/// Recommend tracks for a completed (or partial) answer sheet.
///
/// # Examples
///
/// ```
/// # use hustle_core::assessment::{Answers, QuestionKey};
/// # use hustle_core::recommendation::recommend;
/// let answers = Answers::new()
///     .with(QuestionKey::Skills, "tech")
///     .with(QuestionKey::Time, "5-10");
/// let ids: Vec<String> = recommend(&answers).into_iter().map(|id| id.into_inner()).collect();
/// assert_eq!(ids, ["web-development", "social-media-management"]);
/// ```
#[must_use]
pub fn recommend(answers: &Answers) -> Vec<TrackId> {
    use QuestionKey::{Goals, Skills, Time, WorkStyle};

    let mut picks: Vec<&'static str> = Vec::new();

    if answers.is(Skills, "writing") {
        picks.push(FREELANCE_WRITING);
        if answers.is_any(Time, LONG_HOURS) || answers.is(Goals, "extra-income") {
            picks.push(CONTENT_CREATION);
        }
    }
    if answers.is(Skills, "admin") || answers.is(WorkStyle, "structured") {
        picks.push(VIRTUAL_ASSISTANT);
    }
    if answers.is(Skills, "teaching") || answers.is(Goals, "new-skills") {
        picks.push(ONLINE_TUTORING);
    }
    if answers.is(Skills, "design") || answers.is(WorkStyle, "creative") {
        picks.push(GRAPHIC_DESIGN);
    }
    if answers.is(Skills, "tech") {
        picks.push(WEB_DEVELOPMENT);
    }
    if answers.is_any(Time, SHORT_HOURS) {
        picks.push(SOCIAL_MEDIA_MANAGEMENT);
    }

    if picks.len() < MIN_RECOMMENDATIONS {
        for fallback in [FREELANCE_WRITING, SOCIAL_MEDIA_MANAGEMENT] {
            if !picks.contains(&fallback) {
                picks.push(fallback);
            }
        }
    }

    picks.into_iter().map(TrackId::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::QUESTIONS;

    fn slugs(answers: &Answers) -> Vec<String> {
        recommend(answers).into_iter().map(TrackId::into_inner).collect()
    }

    #[test]
    fn tech_with_short_hours() {
        let answers = Answers::new()
            .with(QuestionKey::Skills, "tech")
            .with(QuestionKey::Time, "5-10");
        assert_eq!(slugs(&answers), ["web-development", "social-media-management"]);
    }

    #[test]
    fn empty_answers_fall_back_to_two_defaults() {
        assert_eq!(slugs(&Answers::new()), ["freelance-writing", "social-media-management"]);
    }

    #[test]
    fn writer_with_long_hours_gets_content_creation() {
        let answers = Answers::new()
            .with(QuestionKey::Skills, "writing")
            .with(QuestionKey::Time, "20-plus");
        assert_eq!(slugs(&answers), ["freelance-writing", "content-creation"]);
    }

    #[test]
    fn writer_with_extra_income_and_flexible_time() {
        let answers = Answers::new()
            .with(QuestionKey::Skills, "writing")
            .with(QuestionKey::Goals, "extra-income")
            .with(QuestionKey::Time, "flexible");
        assert_eq!(
            slugs(&answers),
            ["freelance-writing", "content-creation", "social-media-management"]
        );
    }

    #[test]
    fn single_match_is_padded_without_duplicates() {
        let answers = Answers::new().with(QuestionKey::Time, "less-than-5");
        assert_eq!(slugs(&answers), ["social-media-management", "freelance-writing"]);

        let answers = Answers::new().with(QuestionKey::Skills, "writing");
        assert_eq!(slugs(&answers), ["freelance-writing", "social-media-management"]);
    }

    #[test]
    fn work_style_rules_fire() {
        let answers = Answers::new()
            .with(QuestionKey::WorkStyle, "structured")
            .with(QuestionKey::Goals, "new-skills");
        assert_eq!(slugs(&answers), ["virtual-assistant", "online-tutoring"]);

        let answers = Answers::new().with(QuestionKey::WorkStyle, "creative");
        assert_eq!(
            slugs(&answers),
            ["graphic-design", "freelance-writing", "social-media-management"]
        );
    }

    #[test]
    fn rule_order_is_preserved() {
        let answers = Answers::new()
            .with(QuestionKey::Skills, "design")
            .with(QuestionKey::Goals, "new-skills")
            .with(QuestionKey::WorkStyle, "structured")
            .with(QuestionKey::Time, "10-20");
        assert_eq!(
            slugs(&answers),
            ["virtual-assistant", "online-tutoring", "graphic-design"]
        );
    }

    #[test]
    fn every_full_answer_sheet_yields_at_least_two_and_is_deterministic() {
        let [time, skills, goals, experience, style] = &QUESTIONS;
        for t in time.options {
            for s in skills.options {
                for g in goals.options {
                    for e in experience.options {
                        for w in style.options {
                            let answers = Answers::new()
                                .with(QuestionKey::Time, t.value)
                                .with(QuestionKey::Skills, s.value)
                                .with(QuestionKey::Goals, g.value)
                                .with(QuestionKey::Experience, e.value)
                                .with(QuestionKey::WorkStyle, w.value);
                            let first = recommend(&answers);
                            assert!(first.len() >= MIN_RECOMMENDATIONS);
                            assert_eq!(first, recommend(&answers));
                        }
                    }
                }
            }
        }
    }
}
