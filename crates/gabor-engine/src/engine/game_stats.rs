/// Points awarded for finding the target.
pub const CORRECT_PICK_POINTS: usize = 10;

/// Per-session statistics.
///
/// - **Score**: points from correct target picks
/// - **Round**: current round number, starting at 1
/// - **Correct picks**: targets found
/// - **Matched pairs**: pairs removed from pair-matching grids
/// - **Mistakes**: wrong target picks and mismatched pairs
///
/// # Example
///
/// ```
/// use gabor_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_correct_pick();
/// stats.advance_round();
///
/// assert_eq!(stats.score(), 10);
/// assert_eq!(stats.round(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    round: u32,
    correct_picks: usize,
    matched_pairs: usize,
    mistakes: usize,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            round: 1,
            correct_picks: 0,
            matched_pairs: 0,
            mistakes: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn correct_picks(&self) -> usize {
        self.correct_picks
    }

    #[must_use]
    pub const fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[must_use]
    pub const fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub const fn record_correct_pick(&mut self) {
        self.correct_picks += 1;
        self.score += CORRECT_PICK_POINTS;
    }

    pub const fn record_match(&mut self) {
        self.matched_pairs += 1;
    }

    pub const fn record_mistake(&mut self) {
        self.mistakes += 1;
    }

    pub const fn advance_round(&mut self) {
        self.round = self.round.saturating_add(1);
    }
}
