//! XP accrual and level-up math.
//!
//! A level is cleared once the XP inside it reaches the level threshold. The
//! surplus carries over and the threshold grows by half (floored) for every
//! level cleared.

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// Level every new profile starts at.
pub const STARTING_LEVEL: u32 = 1;

/// XP required to clear the first level.
pub const STARTING_XP_THRESHOLD: u32 = 1000;

/// XP awarded for finishing the assessment questionnaire.
pub const ASSESSMENT_XP: u32 = 200;

/// XP awarded for finishing a track lesson.
pub const LESSON_XP: u32 = 50;

/// XP awarded for a perfect quiz; partial scores earn a rounded share.
pub const QUIZ_MAX_XP: u32 = 200;

/// XP awarded for completing a track.
pub const TRACK_COMPLETION_XP: u32 = 500;

/// Track progress recorded when its lesson is finished.
pub const LESSON_PROGRESS_PERCENT: u8 = 50;

//
// ─── LEVEL STATE ───────────────────────────────────────────────────────────────
//

/// Level, XP and threshold triple after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelState {
    pub level: u32,
    pub xp: u64,
    pub xp_threshold: u64,
}

impl LevelState {
    #[must_use]
    pub fn new(level: u32, xp: u64, xp_threshold: u64) -> Self {
        Self {
            level,
            xp,
            xp_threshold,
        }
    }

    /// Fresh profile state: level 1, no XP, threshold 1000.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(STARTING_LEVEL, 0, u64::from(STARTING_XP_THRESHOLD))
    }

    /// Adds XP and applies every level-up it pays for.
    ///
    /// Returns the normalized state and the number of levels gained.
    #[must_use]
    pub fn gain(self, amount: u64) -> (Self, u32) {
        Self::new(self.level, self.xp.saturating_add(amount), self.xp_threshold).normalize()
    }

    /// Rolls surplus XP into levels until `xp < xp_threshold`.
    ///
    /// Thresholds only ever grow from the starting threshold, so anything
    /// below it is replaced by it. This keeps the loop logarithmic in `xp`.
    #[must_use]
    pub fn normalize(self) -> (Self, u32) {
        let mut state = self;
        if state.xp_threshold < u64::from(STARTING_XP_THRESHOLD) {
            state.xp_threshold = u64::from(STARTING_XP_THRESHOLD);
        }
        if state.level == 0 {
            state.level = STARTING_LEVEL;
        }

        let mut gained = 0;
        while state.xp >= state.xp_threshold {
            state.xp -= state.xp_threshold;
            state.xp_threshold = next_threshold(state.xp_threshold);
            state.level = state.level.saturating_add(1);
            gained += 1;
        }
        (state, gained)
    }

    /// Percentage of the current level already earned.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        progress_percent(self.xp, self.xp_threshold)
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::initial()
    }
}

//
// ─── FORMULAS ──────────────────────────────────────────────────────────────────
//

/// Threshold of the level after one at `threshold`: `floor(threshold * 1.5)`.
#[must_use]
pub fn next_threshold(threshold: u64) -> u64 {
    threshold.saturating_add(threshold / 2)
}

/// `floor(min(xp / threshold, 1) * 100)`; a zero threshold reads as full.
#[must_use]
pub fn progress_percent(xp: u64, threshold: u64) -> u8 {
    if threshold == 0 || xp >= threshold {
        return 100;
    }
    let percent = u128::from(xp) * 100 / u128::from(threshold);
    u8::try_from(percent).unwrap_or(100)
}

/// `round(part / whole * 100)` with halves rounded up; `0` when `whole == 0`.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> u8 {
    let value = rounded_share(part, whole, 100).min(100);
    u8::try_from(value).unwrap_or(100)
}

/// `round(part / whole * scale)` with halves rounded up; `0` when `whole == 0`.
#[must_use]
pub fn rounded_share(part: u32, whole: u32, scale: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let numerator = u64::from(part) * u64::from(scale) * 2 + u64::from(whole);
    let value = numerator / (u64::from(whole) * 2);
    u32::try_from(value).unwrap_or(u32::MAX)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_below_threshold_keeps_level() {
        let (state, gained) = LevelState::initial().gain(999);
        assert_eq!(state, LevelState::new(1, 999, 1000));
        assert_eq!(gained, 0);
    }

    #[test]
    fn gain_exactly_threshold_levels_up() {
        let (state, gained) = LevelState::initial().gain(1000);
        assert_eq!(state, LevelState::new(2, 0, 1500));
        assert_eq!(gained, 1);
    }

    #[test]
    fn single_level_up_carries_surplus() {
        let (state, gained) = LevelState::initial().gain(1200);
        assert_eq!(state, LevelState::new(2, 200, 1500));
        assert_eq!(gained, 1);
    }

    #[test]
    fn multi_level_overflow_repeats_until_below_threshold() {
        let (state, gained) = LevelState::initial().gain(3500);
        assert_eq!(state, LevelState::new(3, 1000, 2250));
        assert_eq!(gained, 2);
    }

    #[test]
    fn threshold_growth_floors() {
        assert_eq!(next_threshold(1000), 1500);
        assert_eq!(next_threshold(1500), 2250);
        assert_eq!(next_threshold(2250), 3375);
        assert_eq!(next_threshold(3375), 5062);
    }

    #[test]
    fn normalize_repairs_zero_threshold_and_level() {
        let (state, gained) = LevelState::new(0, 10, 0).normalize();
        assert_eq!(state, LevelState::new(1, 10, 1000));
        assert_eq!(gained, 0);
    }

    #[test]
    fn normalize_raises_undersized_threshold() {
        let (state, gained) = LevelState::new(1, 999, 1).normalize();
        assert_eq!(state, LevelState::new(1, 999, 1000));
        assert_eq!(gained, 0);
    }

    #[test]
    fn huge_xp_with_tiny_threshold_settles_quickly() {
        let (state, gained) = LevelState::new(1, u64::MAX / 2, 1).normalize();
        assert!(state.xp < state.xp_threshold);
        assert!(gained < 128, "gained {gained}");
        assert_eq!(state.level, 1 + gained);
    }

    #[test]
    fn normalized_state_is_always_below_threshold() {
        for amount in [0_u64, 1, 999, 1000, 2499, 2500, 10_000, 123_456] {
            let (state, _) = LevelState::initial().gain(amount);
            assert!(state.xp < state.xp_threshold, "amount {amount}");
        }
    }

    #[test]
    fn progress_percent_floors() {
        assert_eq!(progress_percent(250, 1000), 25);
        assert_eq!(progress_percent(999, 1000), 99);
        assert_eq!(progress_percent(0, 1000), 0);
        assert_eq!(progress_percent(200, 1500), 13);
    }

    #[test]
    fn progress_percent_caps_at_hundred() {
        assert_eq!(progress_percent(1000, 1000), 100);
        assert_eq!(progress_percent(5000, 1000), 100);
        assert_eq!(progress_percent(1, 0), 100);
    }

    #[test]
    fn rounded_share_rounds_half_up() {
        assert_eq!(rounded_share(3, 5, 200), 120);
        assert_eq!(rounded_share(1, 3, 200), 67);
        assert_eq!(rounded_share(1, 8, 100), 13);
        assert_eq!(rounded_share(0, 5, 200), 0);
        assert_eq!(rounded_share(1, 0, 200), 0);
    }

    #[test]
    fn rounded_percent_matches_question_steps() {
        let steps: Vec<u8> = (1..=5).map(|answered| rounded_percent(answered, 5)).collect();
        assert_eq!(steps, vec![20, 40, 60, 80, 100]);
    }
}
