use std::ops::Range;

use rand::{
    Rng,
    seq::{IndexedRandom as _, SliceRandom as _},
};
use serde::Serialize;

use crate::{DEFAULT_CONTRAST, DEFAULT_SIGMA, InvalidParameterError, Orientation, StimulusParams};

/// Number of slots in the selection grid (3×3).
pub const TARGET_GRID_SLOTS: usize = 9;

/// Angles (degrees) the target orientation is drawn from.
pub const TARGET_ANGLES_DEG: [u32; 8] = [0, 30, 45, 60, 90, 120, 135, 150];

/// Offsets (degrees) between a distractor and the target.
///
/// Bounded away from 0° and 180° so that no distractor can be mistaken for
/// the target under rotation-wrap equality.
pub const DISTRACTOR_OFFSET_DEG: Range<u32> = 20..160;

pub const DEFAULT_TARGET_PATCH_SIZE: u32 = 120;

const BASE_FREQUENCY: f64 = 4.0;
const FREQUENCY_STEP: f64 = 0.2;

/// One round of the "find the same pattern" game.
///
/// Holds the target patch and a shuffled grid of [`TARGET_GRID_SLOTS`]
/// patches, exactly one of which has the target's orientation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRound {
    round: u32,
    target: StimulusParams,
    grid: [StimulusParams; TARGET_GRID_SLOTS],
    target_slot: usize,
}

impl TargetRound {
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn target(&self) -> &StimulusParams {
        &self.target
    }

    #[must_use]
    pub const fn target_orientation(&self) -> Orientation {
        self.target.orientation()
    }

    #[must_use]
    pub const fn grid(&self) -> &[StimulusParams; TARGET_GRID_SLOTS] {
        &self.grid
    }

    /// Index of the grid slot that matches the target.
    #[must_use]
    pub const fn target_slot(&self) -> usize {
        self.target_slot
    }

    /// Iterates over `(slot index, params)` in grid order.
    pub fn slots(&self) -> impl ExactSizeIterator<Item = (usize, &StimulusParams)> {
        self.grid.iter().enumerate()
    }

    /// Returns whether picking `slot` answers the round correctly.
    #[must_use]
    pub fn is_correct(&self, slot: usize) -> bool {
        self.grid
            .get(slot)
            .is_some_and(|params| params.orientation().approx_eq(self.target_orientation()))
    }
}

/// Generates [`TargetRound`]s.
///
/// Difficulty grows with the round number through the grating frequency
/// (`4.0 + round * 0.2`); envelope and contrast stay fixed.
///
/// # Example
///
/// ```
/// use gabor_engine::{RoundSeed, TargetRoundGenerator};
///
/// let mut rng = RoundSeed::from_bytes([7; 16]).rng();
/// let round = TargetRoundGenerator::default().generate(1, &mut rng).unwrap();
///
/// assert_eq!(round.grid().len(), 9);
/// assert!(round.is_correct(round.target_slot()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRoundGenerator {
    patch_size: u32,
}

impl Default for TargetRoundGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_PATCH_SIZE)
    }
}

impl TargetRoundGenerator {
    #[must_use]
    pub const fn new(patch_size: u32) -> Self {
        Self { patch_size }
    }

    #[must_use]
    pub const fn patch_size(&self) -> u32 {
        self.patch_size
    }

    /// Grating frequency used in the given round.
    #[must_use]
    pub fn frequency(round: u32) -> f64 {
        BASE_FREQUENCY + f64::from(round) * FREQUENCY_STEP
    }

    pub fn generate<R>(
        &self,
        round: u32,
        rng: &mut R,
    ) -> Result<TargetRound, InvalidParameterError>
    where
        R: Rng + ?Sized,
    {
        if round == 0 {
            return Err(InvalidParameterError::ZeroRound);
        }

        let degrees = *TARGET_ANGLES_DEG
            .choose(rng)
            .expect("target angle table should never be empty");
        let target_orientation = Orientation::from_degrees(f64::from(degrees))?;
        let target = StimulusParams::new(
            self.patch_size,
            target_orientation,
            Self::frequency(round),
            DEFAULT_SIGMA,
            DEFAULT_CONTRAST,
        )?;

        let mut orientations = [target_orientation; TARGET_GRID_SLOTS];
        for distractor in &mut orientations[1..] {
            let offset = rng.random_range(DISTRACTOR_OFFSET_DEG);
            *distractor = target_orientation.rotated_by_degrees(offset);
        }
        orientations.shuffle(rng);

        let grid = orientations.map(|orientation| target.with_orientation(orientation));
        let target_slot = grid
            .iter()
            .position(|params| params.orientation() == target_orientation)
            .expect("target orientation should survive the shuffle");

        tracing::debug!(
            round,
            target = %target_orientation,
            target_slot,
            frequency = target.frequency(),
            "generated target round"
        );

        Ok(TargetRound {
            round,
            target,
            grid,
            target_slot,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::RoundSeed;

    fn seed(n: u8) -> RoundSeed {
        RoundSeed::from_bytes([n; 16])
    }

    #[test]
    fn test_round_zero_is_rejected() {
        let mut rng = seed(1).rng();
        assert_eq!(
            TargetRoundGenerator::default().generate(0, &mut rng),
            Err(InvalidParameterError::ZeroRound)
        );
    }

    #[test]
    fn test_first_round() {
        let mut rng = seed(2).rng();
        let round = TargetRoundGenerator::default().generate(1, &mut rng).unwrap();

        assert_eq!(round.round(), 1);
        assert!((round.target().frequency() - 4.2).abs() < 1e-12);
        assert_eq!(round.target().size(), DEFAULT_TARGET_PATCH_SIZE);
        assert_eq!(round.grid().len(), TARGET_GRID_SLOTS);

        let target_deg = round.target_orientation().degrees();
        assert!(
            TARGET_ANGLES_DEG
                .iter()
                .any(|&deg| (f64::from(deg) - target_deg).abs() < 1e-9),
            "unexpected target angle {target_deg}"
        );

        let correct: Vec<_> = (0..TARGET_GRID_SLOTS)
            .filter(|&slot| round.is_correct(slot))
            .collect();
        assert_eq!(correct, vec![round.target_slot()]);
    }

    #[test]
    fn test_exactly_one_slot_matches_target() {
        let generator = TargetRoundGenerator::new(8);
        for n in 0..50 {
            let mut rng = seed(n).rng();
            for round_number in 1..=10 {
                let round = generator.generate(round_number, &mut rng).unwrap();
                let target = round.target_orientation();
                let matches = round
                    .slots()
                    .filter(|(_, params)| params.orientation().approx_eq(target))
                    .count();
                assert_eq!(matches, 1);
                assert!(!round.is_correct(TARGET_GRID_SLOTS));
            }
        }
    }

    #[test]
    fn test_distractor_offsets_stay_bounded() {
        let generator = TargetRoundGenerator::new(8);
        for n in 0..50 {
            let mut rng = seed(n).rng();
            let round = generator.generate(3, &mut rng).unwrap();
            let target = round.target_orientation();
            for (slot, params) in round.slots() {
                if slot == round.target_slot() {
                    continue;
                }
                let offset = target.wrapped_difference(params.orientation()).to_degrees();
                assert!(
                    (20.0 - 1e-9..160.0 + 1e-9).contains(&offset),
                    "slot {slot} offset {offset}°"
                );
            }
        }
    }

    #[test]
    fn test_frequency_scales_with_round() {
        let mut rng = seed(3).rng();
        let generator = TargetRoundGenerator::default();
        for round_number in [1, 2, 5, 10] {
            let round = generator.generate(round_number, &mut rng).unwrap();
            let expected = 4.0 + f64::from(round_number) * 0.2;
            for (_, params) in round.slots() {
                assert!((params.frequency() - expected).abs() < 1e-12);
                assert!((params.sigma() - DEFAULT_SIGMA).abs() < f64::EPSILON);
                assert!((params.contrast() - DEFAULT_CONTRAST).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_same_seed_same_round() {
        let generator = TargetRoundGenerator::default();
        let mut rng1 = seed(9).rng();
        let mut rng2 = seed(9).rng();
        for round_number in 1..=5 {
            assert_eq!(
                generator.generate(round_number, &mut rng1).unwrap(),
                generator.generate(round_number, &mut rng2).unwrap()
            );
        }
    }

    #[test]
    fn test_target_slot_is_shuffled() {
        let generator = TargetRoundGenerator::new(4);
        let mut rng = seed(11).rng();
        let slots: HashSet<_> = (0..300)
            .map(|_| generator.generate(1, &mut rng).unwrap().target_slot())
            .collect();
        assert_eq!(slots.len(), TARGET_GRID_SLOTS);
    }

    #[test]
    fn test_zero_patch_size_is_rejected() {
        let mut rng = seed(4).rng();
        assert_eq!(
            TargetRoundGenerator::new(0).generate(1, &mut rng),
            Err(InvalidParameterError::ZeroSize)
        );
    }
}
