use std::f64::consts::PI;

use arrayvec::ArrayVec;
use rand::{Rng, seq::SliceRandom as _};
use serde::Serialize;

use crate::{DEFAULT_CONTRAST, DEFAULT_SIGMA, InvalidParameterError, Orientation, StimulusParams};

/// Upper bound on the number of pairs in a round.
pub const MAX_PAIRS: usize = 8;

pub const DEFAULT_PAIR_PATCH_SIZE: u32 = 100;

const PAIR_FREQUENCY: f64 = 4.0;

/// Number of pairs shown in the given round: 2, 4, 6, then 8 from round 4 on.
#[must_use]
pub fn pair_count(round: u32) -> usize {
    let extra = usize::try_from(round.saturating_sub(1))
        .unwrap_or(usize::MAX)
        .saturating_mul(2);
    extra.saturating_add(2).min(MAX_PAIRS)
}

/// Grid width for a round with `num_items` patches.
///
/// | items  | columns |
/// |--------|---------|
/// | ≤ 8    | 2       |
/// | 9..=12 | 3       |
/// | > 12   | 4       |
#[must_use]
pub const fn grid_columns(num_items: usize) -> usize {
    match num_items {
        0..=8 => 2,
        9..=12 => 3,
        _ => 4,
    }
}

/// One round of the pair-matching game.
///
/// Every orientation in `items` appears exactly twice; the order is
/// shuffled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRound {
    round: u32,
    items: Vec<StimulusParams>,
    columns: usize,
}

impl PairRound {
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn items(&self) -> &[StimulusParams] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.items.len() / 2
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }

    /// Returns whether the patches in slots `a` and `b` form a pair.
    #[must_use]
    pub fn is_match(&self, a: usize, b: usize) -> bool {
        match (self.items.get(a), self.items.get(b)) {
            (Some(a), Some(b)) => a.orientation().approx_eq(b.orientation()),
            _ => false,
        }
    }
}

/// Generates [`PairRound`]s.
///
/// Orientations are drawn uniformly from `[0, π)`. A draw that would be
/// indistinguishable from an earlier one is drawn again, so the pairs are
/// unambiguous.
///
/// # Example
///
/// ```
/// use gabor_engine::{PairRoundGenerator, RoundSeed};
///
/// let mut rng = RoundSeed::from_bytes([3; 16]).rng();
/// let round = PairRoundGenerator::default().generate(3, &mut rng).unwrap();
///
/// assert_eq!(round.pair_count(), 6);
/// assert_eq!(round.len(), 12);
/// assert_eq!(round.columns(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairRoundGenerator {
    patch_size: u32,
}

impl Default for PairRoundGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PAIR_PATCH_SIZE)
    }
}

impl PairRoundGenerator {
    #[must_use]
    pub const fn new(patch_size: u32) -> Self {
        Self { patch_size }
    }

    #[must_use]
    pub const fn patch_size(&self) -> u32 {
        self.patch_size
    }

    pub fn generate<R>(
        &self,
        round: u32,
        rng: &mut R,
    ) -> Result<PairRound, InvalidParameterError>
    where
        R: Rng + ?Sized,
    {
        if round == 0 {
            return Err(InvalidParameterError::ZeroRound);
        }
        let template = StimulusParams::new(
            self.patch_size,
            Orientation::ZERO,
            PAIR_FREQUENCY,
            DEFAULT_SIGMA,
            DEFAULT_CONTRAST,
        )?;

        let num_pairs = pair_count(round);
        let mut bases = ArrayVec::<Orientation, MAX_PAIRS>::new();
        while bases.len() < num_pairs {
            let candidate = Orientation::from_radians(rng.random_range(0.0..PI))?;
            if bases.iter().all(|base| !base.approx_eq(candidate)) {
                bases.push(candidate);
            }
        }

        let mut items: Vec<_> = bases
            .iter()
            .chain(&bases)
            .map(|&orientation| template.with_orientation(orientation))
            .collect();
        items.shuffle(rng);
        let columns = grid_columns(items.len());

        tracing::debug!(round, num_pairs, columns, "generated pair round");

        Ok(PairRound {
            round,
            items,
            columns,
        })
    }
}
