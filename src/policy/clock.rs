use crate::common::FrameIndex;

use super::{Candidate, ReplacementPolicy};

/// Second-chance replacement over a circular hand.
#[derive(Debug, Default, Clone)]
pub struct ClockPolicy {
    hand: usize,
}

impl ClockPolicy {
    pub fn new() -> Self {
        Self { hand: 0 }
    }

    pub fn hand(&self) -> usize {
        self.hand
    }
}

impl ReplacementPolicy for ClockPolicy {
    fn name(&self) -> &'static str {
        "CLOCK"
    }

    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
        let len = candidates.len();
        if len == 0 {
            return None;
        }

        // The first lap clears every set bit, so the second lap always stops.
        for _ in 0..2 * len {
            let idx = self.hand % len;
            self.hand = (idx + 1) % len;

            let candidate = &mut candidates[idx];
            if candidate.referenced {
                candidate.referenced = false;
            } else {
                return Some(candidate.frame);
            }
        }

        None
    }
}
