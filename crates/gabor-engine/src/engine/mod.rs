//! Round generation and game flow.
//!
//! - [`TargetRoundGenerator`] / [`TargetRound`] - "find the same pattern" rounds
//! - [`PairRoundGenerator`] / [`PairRound`] - pair-matching rounds
//! - [`TargetBoard`] / [`PairBoard`] - per-round selection state
//! - [`GameSession`] - one play-through of a mode, driven by a frame clock
//! - [`GameStats`] - score, round number and counters
//! - [`Scheduler`] - deferred transitions guarded by [`RoundToken`]s
//! - [`RoundSeed`] - seed for reproducible rounds
//! - [`Renderer`] - how a front end turns patches into its own output
//!
//! # Game Flow
//!
//! 1. The player picks a mode and a [`GameSession`] deals round 1
//! 2. The front end renders the round through a [`Renderer`]
//! 3. Picks go through [`GameSession::select`]
//! 4. [`GameSession::increment_frame`] fires comparisons and round changes
//!    once their delay has passed
//! 5. Leaving the mode drops the session
//!
//! # Example
//!
//! ```
//! use gabor_engine::{PairRoundGenerator, RoundSeed, synthesize};
//!
//! let seed: RoundSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let round = PairRoundGenerator::new(16).generate(1, &mut seed.rng()).unwrap();
//!
//! for params in round.items() {
//!     let image = synthesize(params);
//!     assert_eq!(image.len(), 16 * 16);
//! }
//! ```

pub use self::{
    board::*, config::*, game_session::*, game_stats::*, pair_round::*, renderer::*,
    round_seed::*, scheduler::*, target_round::*,
};

mod board;
mod config;
mod game_session;
mod game_stats;
mod pair_round;
mod renderer;
mod round_seed;
mod scheduler;
mod target_round;
