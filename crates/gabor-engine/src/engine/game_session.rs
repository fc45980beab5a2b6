use std::time::Duration;

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    DeferredAction, GameConfig, GameStats, InvalidParameterError, PairBoard, PairComparison,
    PairPick, PairRoundGenerator, RenderedRound, Renderer, RoundRng, RoundSeed, RoundToken,
    Scheduler, TargetBoard, TargetPick, TargetRoundGenerator, synthesize,
};

/// Which game a session plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Find the grid patch with the target's orientation.
    #[display("find the same pattern")]
    TargetSelection,
    /// Uncover matching pairs of orientations.
    #[display("pair matching")]
    PairMatching,
}

/// Message shown to the player after the last transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Feedback {
    #[display("Correct!")]
    Correct,
    #[display("Look closely and try again.")]
    TryAgain,
    #[display("Match!")]
    PairMatched,
    #[display("Not a match.")]
    PairMismatched,
    #[display("All pairs found!")]
    AllPairsFound,
}

impl Feedback {
    /// Whether the feedback reports success.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Correct | Self::PairMatched | Self::AllPairsFound)
    }
}

/// Immediate result of [`GameSession::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored,
    /// Target found; the next round is scheduled.
    Correct,
    /// Wrong target pick; the slot is marked and the grid stays open.
    Wrong,
    /// First slot of a pair selected.
    Selected,
    /// Second slot of a pair selected; the comparison is scheduled.
    ComparePending,
}

/// Selection state of the round currently on screen.
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum RoundBoard {
    Target(TargetBoard),
    Pair(PairBoard),
}

impl RoundBoard {
    /// Round number the board was generated for.
    #[must_use]
    pub const fn round(&self) -> u32 {
        match self {
            Self::Target(board) => board.round().round(),
            Self::Pair(board) => board.round().round(),
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        match self {
            Self::Target(board) => board.round().grid().len(),
            Self::Pair(board) => board.round().len(),
        }
    }

    /// Grid width in slots.
    #[must_use]
    pub const fn columns(&self) -> usize {
        match self {
            Self::Target(_) => 3,
            Self::Pair(board) => board.round().columns(),
        }
    }

    #[must_use]
    pub const fn as_target(&self) -> Option<&TargetBoard> {
        match self {
            Self::Target(board) => Some(board),
            Self::Pair(_) => None,
        }
    }

    #[must_use]
    pub const fn as_pair(&self) -> Option<&PairBoard> {
        match self {
            Self::Target(_) => None,
            Self::Pair(board) => Some(board),
        }
    }
}

/// Converts a delay into a whole number of frames, rounding up.
#[must_use]
pub fn delay_frames(delay: Duration, fps: u64) -> u64 {
    let frames = (delay.as_millis() * u128::from(fps)).div_ceil(1000);
    u64::try_from(frames).unwrap_or(u64::MAX)
}

/// One play-through of a game mode.
///
/// Created when the player picks a mode and dropped when they leave it. The
/// session runs on a frame clock: the front end calls
/// [`increment_frame`](Self::increment_frame) once per tick, and timed
/// transitions (pair comparison, next round) fire when their frame comes.
///
/// Every deferred transition remembers the [`RoundToken`] it was scheduled
/// under. Restarting or replacing the round issues a new token, so a
/// transition left over from an earlier round never touches the new one.
///
/// # Example
///
/// ```
/// use gabor_engine::{GameConfig, GameMode, GameSession, RoundSeed, SelectOutcome};
///
/// let seed = RoundSeed::from_bytes([1; 16]);
/// let mut session =
///     GameSession::with_seed(GameMode::TargetSelection, GameConfig::default(), 30, seed)
///         .unwrap();
///
/// let slot = session.board().as_target().unwrap().round().target_slot();
/// assert_eq!(session.select(slot), SelectOutcome::Correct);
/// assert_eq!(session.stats().score(), 10);
/// assert_eq!(session.stats().round(), 2);
///
/// // The next round appears once the feedback delay has passed.
/// for _ in 0..30 {
///     session.increment_frame();
/// }
/// assert_eq!(session.board().round(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    config: GameConfig,
    seed: RoundSeed,
    rng: RoundRng,
    board: RoundBoard,
    stats: GameStats,
    token: RoundToken,
    scheduler: Scheduler,
    feedback: Option<Feedback>,
    fps: u64,
    total_frames: u64,
}

impl GameSession {
    /// Starts a session with a random seed.
    pub fn new(
        mode: GameMode,
        config: GameConfig,
        fps: u64,
    ) -> Result<Self, InvalidParameterError> {
        Self::with_seed(mode, config, fps, rand::rng().random())
    }

    pub fn with_seed(
        mode: GameMode,
        config: GameConfig,
        fps: u64,
        seed: RoundSeed,
    ) -> Result<Self, InvalidParameterError> {
        let mut rng = seed.rng();
        let stats = GameStats::new();
        let round = stats.round();
        let board = generate_board(mode, &config, round, &mut rng)?;
        tracing::info!(%mode, %seed, fps, "game session started");
        Ok(Self {
            mode,
            config,
            seed,
            rng,
            board,
            stats,
            token: RoundToken::new(round, 0),
            scheduler: Scheduler::new(),
            feedback: None,
            fps,
            total_frames: 0,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> RoundSeed {
        self.seed
    }

    #[must_use]
    pub const fn board(&self) -> &RoundBoard {
        &self.board
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Identity of the round instance on screen.
    #[must_use]
    pub const fn token(&self) -> RoundToken {
        self.token
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Ticks per second the session's delays are counted in.
    #[must_use]
    pub const fn fps(&self) -> u64 {
        self.fps
    }

    #[must_use]
    pub const fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Number of timed transitions that have not fired yet.
    #[must_use]
    pub fn pending_actions(&self) -> usize {
        self.scheduler.len()
    }

    /// Applies a player pick of grid slot `slot`.
    pub fn select(&mut self, slot: usize) -> SelectOutcome {
        match &mut self.board {
            RoundBoard::Target(board) => match board.pick(slot) {
                TargetPick::Ignored => SelectOutcome::Ignored,
                TargetPick::Wrong => {
                    self.stats.record_mistake();
                    self.feedback = Some(Feedback::TryAgain);
                    SelectOutcome::Wrong
                }
                TargetPick::Correct => {
                    self.stats.record_correct_pick();
                    self.stats.advance_round();
                    self.feedback = Some(Feedback::Correct);
                    self.schedule(self.config.feedback_delay(), DeferredAction::StartNextRound);
                    SelectOutcome::Correct
                }
            },
            RoundBoard::Pair(board) => match board.pick(slot) {
                PairPick::Ignored => SelectOutcome::Ignored,
                PairPick::Selected => SelectOutcome::Selected,
                PairPick::Ready { first, second } => {
                    self.schedule(
                        self.config.compare_delay(),
                        DeferredAction::ComparePair { first, second },
                    );
                    SelectOutcome::ComparePending
                }
            },
        }
    }

    /// Advances the frame clock by one tick and fires due transitions.
    pub fn increment_frame(&mut self) {
        self.total_frames += 1;
        for deferred in self.scheduler.take_due(self.total_frames) {
            if deferred.token != self.token {
                tracing::debug!(
                    action = ?deferred.action,
                    scheduled = ?deferred.token,
                    current = ?self.token,
                    "dropping stale deferred action"
                );
                continue;
            }
            match deferred.action {
                DeferredAction::StartNextRound => self.start_round(),
                DeferredAction::ComparePair { first, second } => self.compare_pair(first, second),
            }
        }
    }

    /// Throws away the round on screen and deals a fresh one with the same
    /// round number. Pending transitions of the old round are discarded.
    pub fn restart_round(&mut self) {
        tracing::debug!(round = self.stats.round(), "restarting round");
        self.start_round();
    }

    /// Synthesizes every patch of the current round through `renderer`.
    pub fn render_round<R>(&self, renderer: &mut R) -> RenderedRound<R::Output>
    where
        R: Renderer + ?Sized,
    {
        match &self.board {
            RoundBoard::Target(board) => {
                let round = board.round();
                RenderedRound {
                    target: Some(renderer.render(&synthesize(round.target()))),
                    slots: round
                        .grid()
                        .iter()
                        .map(|params| renderer.render(&synthesize(params)))
                        .collect(),
                }
            }
            RoundBoard::Pair(board) => RenderedRound {
                target: None,
                slots: board
                    .round()
                    .items()
                    .iter()
                    .map(|params| renderer.render(&synthesize(params)))
                    .collect(),
            },
        }
    }

    fn schedule(&mut self, delay: Duration, action: DeferredAction) {
        let due_frame = self.total_frames + delay_frames(delay, self.fps);
        self.scheduler.schedule(due_frame, self.token, action);
    }

    fn start_round(&mut self) {
        let round = self.stats.round();
        self.board = generate_board(self.mode, &self.config, round, &mut self.rng)
            .expect("round generation should never fail once the first round was generated");
        self.token = self.token.next(round);
        self.feedback = None;
        tracing::debug!(round, generation = self.token.generation(), "round started");
    }

    fn compare_pair(&mut self, first: usize, second: usize) {
        let RoundBoard::Pair(board) = &mut self.board else {
            return;
        };
        match board.compare(first, second) {
            PairComparison::Stale => {}
            PairComparison::Mismatched => {
                self.stats.record_mistake();
                self.feedback = Some(Feedback::PairMismatched);
            }
            PairComparison::Matched => {
                self.stats.record_match();
                if board.is_complete() {
                    self.stats.advance_round();
                    self.feedback = Some(Feedback::AllPairsFound);
                    self.schedule(self.config.feedback_delay(), DeferredAction::StartNextRound);
                } else {
                    self.feedback = Some(Feedback::PairMatched);
                }
            }
        }
    }
}

fn generate_board(
    mode: GameMode,
    config: &GameConfig,
    round: u32,
    rng: &mut RoundRng,
) -> Result<RoundBoard, InvalidParameterError> {
    let board = match mode {
        GameMode::TargetSelection => RoundBoard::Target(TargetBoard::new(
            TargetRoundGenerator::new(config.target_patch_size).generate(round, rng)?,
        )),
        GameMode::PairMatching => RoundBoard::Pair(PairBoard::new(
            PairRoundGenerator::new(config.pair_patch_size).generate(round, rng)?,
        )),
    };
    Ok(board)
}
