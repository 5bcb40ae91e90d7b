//! Index sources for picking among candidate hosts.

use rand::rngs::OsRng;
use rand::Rng;

/// Yields a uniform index in `[0, upper)`. `upper` is always at least 1.
pub trait IndexSource {
    fn index(&mut self, upper: usize) -> usize;
}

/// Operating-system CSPRNG; `gen_range` rejects biased samples, so every
/// candidate is equally likely.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsIndex;

impl IndexSource for OsIndex {
    fn index(&mut self, upper: usize) -> usize {
        OsRng.gen_range(0..upper)
    }
}

/// Replays a fixed sequence of indices (wrapping each modulo `upper`).
/// Lets tests assert exact selection outcomes.
#[derive(Debug, Clone)]
pub struct FixedIndex {
    picks: Vec<usize>,
    next: usize,
}

impl FixedIndex {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            next: 0,
        }
    }
}

impl IndexSource for FixedIndex {
    fn index(&mut self, upper: usize) -> usize {
        let pick = self.picks.get(self.next).copied().unwrap_or(0);
        if !self.picks.is_empty() {
            self.next = (self.next + 1) % self.picks.len();
        }
        pick % upper
    }
}
