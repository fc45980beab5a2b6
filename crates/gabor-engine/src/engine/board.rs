//! Per-round selection state for both game modes.

use arrayvec::ArrayVec;

use crate::{PairRound, TARGET_GRID_SLOTS, TargetRound};

/// Marker left on a target-grid slot after it was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum TargetMark {
    #[default]
    Unmarked,
    Wrong,
    Correct,
}

/// Result of picking a slot in the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TargetPick {
    /// The grid is solved, the slot does not exist or was already rejected.
    Ignored,
    Wrong,
    Correct,
}

/// Target round plus which slots were picked so far.
///
/// Once the correct slot is picked the grid is solved and ignores further
/// picks.
#[derive(Debug, Clone)]
pub struct TargetBoard {
    round: TargetRound,
    marks: [TargetMark; TARGET_GRID_SLOTS],
    solved: bool,
}

impl TargetBoard {
    #[must_use]
    pub fn new(round: TargetRound) -> Self {
        Self {
            round,
            marks: [TargetMark::Unmarked; TARGET_GRID_SLOTS],
            solved: false,
        }
    }

    #[must_use]
    pub const fn round(&self) -> &TargetRound {
        &self.round
    }

    #[must_use]
    pub fn mark(&self, slot: usize) -> Option<TargetMark> {
        self.marks.get(slot).copied()
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn pick(&mut self, slot: usize) -> TargetPick {
        if self.solved {
            return TargetPick::Ignored;
        }
        let correct = self.round.is_correct(slot);
        let Some(mark) = self.marks.get_mut(slot) else {
            return TargetPick::Ignored;
        };
        if mark.is_wrong() {
            return TargetPick::Ignored;
        }
        if correct {
            *mark = TargetMark::Correct;
            self.solved = true;
            TargetPick::Correct
        } else {
            *mark = TargetMark::Wrong;
            TargetPick::Wrong
        }
    }
}

/// Selection state of a pair-matching slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum SlotState {
    #[default]
    Unselected,
    Selected,
    /// Paired up and hidden for the rest of the round.
    Matched,
}

/// Result of selecting a slot in the pair grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PairPick {
    /// Already selected, already matched, missing, or two slots are pending.
    Ignored,
    /// First slot of a pair selected.
    Selected,
    /// Second slot selected; the pair is ready for comparison.
    Ready { first: usize, second: usize },
}

/// Result of comparing the two selected slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PairComparison {
    /// The slots no longer form the current selection.
    Stale,
    Matched,
    Mismatched,
}

/// Pair round plus selection and match state of each slot.
#[derive(Debug, Clone)]
pub struct PairBoard {
    round: PairRound,
    states: Vec<SlotState>,
    selected: ArrayVec<usize, 2>,
    matched: usize,
}

impl PairBoard {
    #[must_use]
    pub fn new(round: PairRound) -> Self {
        let states = vec![SlotState::Unselected; round.len()];
        Self {
            round,
            states,
            selected: ArrayVec::new(),
            matched: 0,
        }
    }

    #[must_use]
    pub const fn round(&self) -> &PairRound {
        &self.round
    }

    #[must_use]
    pub fn state(&self, slot: usize) -> Option<SlotState> {
        self.states.get(slot).copied()
    }

    #[must_use]
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// Number of slots already matched (twice the number of pairs found).
    #[must_use]
    pub const fn matched_count(&self) -> usize {
        self.matched
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched == self.states.len()
    }

    pub fn pick(&mut self, slot: usize) -> PairPick {
        if self.selected.is_full() {
            return PairPick::Ignored;
        }
        let Some(state) = self.states.get_mut(slot) else {
            return PairPick::Ignored;
        };
        if !state.is_unselected() {
            return PairPick::Ignored;
        }
        *state = SlotState::Selected;
        self.selected.push(slot);
        match self.selected.as_slice() {
            &[first, second] => PairPick::Ready { first, second },
            _ => PairPick::Selected,
        }
    }

    /// Resolves the pending pair selection.
    ///
    /// Matching slots become [`SlotState::Matched`]; otherwise both return to
    /// [`SlotState::Unselected`]. Returns [`PairComparison::Stale`] without
    /// touching anything if `first` and `second` are not the current
    /// selection.
    pub fn compare(&mut self, first: usize, second: usize) -> PairComparison {
        if self.selected.as_slice() != [first, second] {
            return PairComparison::Stale;
        }
        self.selected.clear();

        let (next, comparison) = if self.round.is_match(first, second) {
            self.matched += 2;
            (SlotState::Matched, PairComparison::Matched)
        } else {
            (SlotState::Unselected, PairComparison::Mismatched)
        };
        self.states[first] = next;
        self.states[second] = next;
        comparison
    }
}
