use crate::common::FrameIndex;

use super::{Candidate, ReplacementPolicy};

/// Adapts a closure into a policy.
///
/// The closure is only called with a non-empty slice and must return the
/// index of one of the frames it was shown.
pub struct CustomPolicy<F> {
    select: F,
}

impl<F> CustomPolicy<F>
where
    F: FnMut(&[Candidate]) -> FrameIndex + Send,
{
    pub fn new(select: F) -> Self {
        Self { select }
    }
}

impl<F> ReplacementPolicy for CustomPolicy<F>
where
    F: FnMut(&[Candidate]) -> FrameIndex + Send,
{
    fn name(&self) -> &'static str {
        "CUSTOM"
    }

    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex> {
        if candidates.is_empty() {
            return None;
        }
        Some((self.select)(candidates))
    }
}
