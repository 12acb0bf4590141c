use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::common::FrameIndex;

use super::{Candidate, ReplacementPolicy};

/// Uniform choice among occupied frames, reproducible from its seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "RANDOM"
    }

    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
        if candidates.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..candidates.len());
        Some(candidates[idx].frame)
    }
}
