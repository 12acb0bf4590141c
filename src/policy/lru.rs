use crate::common::FrameIndex;

use super::{Candidate, ReplacementPolicy};

/// Evicts the frame whose page was touched least recently.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
        candidates
            .iter()
            .min_by_key(|c| (c.last_access, c.frame))
            .map(|c| c.frame)
    }
}
