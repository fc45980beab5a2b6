use serde::Serialize;

/// Identifies the round a deferred action was scheduled for.
///
/// `generation` increases every time a round starts or restarts, so two
/// tokens are only equal when they refer to the very same round instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoundToken {
    round: u32,
    generation: u64,
}

impl RoundToken {
    #[must_use]
    pub const fn new(round: u32, generation: u64) -> Self {
        Self { round, generation }
    }

    #[must_use]
    pub const fn round(self) -> u32 {
        self.round
    }

    #[must_use]
    pub const fn generation(self) -> u64 {
        self.generation
    }

    /// Token of the next round instance, optionally with a new round number.
    #[must_use]
    pub const fn next(self, round: u32) -> Self {
        Self {
            round,
            generation: self.generation + 1,
        }
    }
}

/// Timed transition of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DeferredAction {
    /// Replace the finished round with a freshly generated one.
    StartNextRound,
    /// Compare the two selected pair slots.
    ComparePair { first: usize, second: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub due_frame: u64,
    pub token: RoundToken,
    pub action: DeferredAction,
}

/// Frame-based queue of deferred actions.
///
/// The scheduler never inspects tokens itself; whoever drains it compares
/// [`Deferred::token`] against the current round and drops stale entries.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Deferred>,
}

impl Scheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due_frame: u64, token: RoundToken, action: DeferredAction) {
        self.pending.push(Deferred {
            due_frame,
            token,
            action,
        });
    }

    /// Removes and returns every action due at or before `frame`.
    ///
    /// Actions are returned by due frame; actions due on the same frame keep
    /// the order they were scheduled in.
    pub fn take_due(&mut self, frame: u64) -> Vec<Deferred> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|deferred| deferred.due_frame <= frame);
        self.pending = pending;
        due.sort_by_key(|deferred| deferred.due_frame);
        due
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &Deferred> {
        self.pending.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
