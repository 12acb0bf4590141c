use crate::common::FrameIndex;

use super::{Candidate, ReplacementPolicy};

/// Evicts the frame loaded longest ago. Ties go to the lowest frame index.
#[derive(Debug, Default, Clone, Copy)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
        candidates
            .iter()
            .min_by_key(|c| (c.load_time, c.frame))
            .map(|c| c.frame)
    }
}
