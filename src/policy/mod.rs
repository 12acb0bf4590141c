//! Victim selection strategies.
//!
//! A policy is consulted only when every frame is occupied. It sees one
//! `Candidate` per frame, in frame order, and names the frame to evict.

pub mod clock;
pub mod custom;
pub mod fifo;
pub mod lru;
pub mod random;

pub use clock::ClockPolicy;
pub use custom::CustomPolicy;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

use crate::{
    common::{FrameIndex, LogicalTime},
    config::{ConfigError, PolicyKind},
    memory::Occupant,
};

/// Snapshot of an occupied frame and its resident page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub frame: FrameIndex,
    pub occupant: Occupant,
    /// When the frame received its current page.
    pub load_time: LogicalTime,
    /// Last access to the resident page.
    pub last_access: LogicalTime,
    /// Reference bit of the resident page. Policies may clear it; the
    /// engine copies the cleared bit back into the page table.
    pub referenced: bool,
}

pub trait ReplacementPolicy: Send {
    fn name(&self) -> &'static str;

    /// Returns `None` only when `candidates` is empty.
    fn select_victim(&mut self, candidates: &mut [Candidate]) -> Option<FrameIndex>;
}

pub type PolicyBox = Box<dyn ReplacementPolicy>;

pub fn build_policy(kind: PolicyKind, seed: u64) -> Result<PolicyBox, ConfigError> {
    match kind {
        PolicyKind::Fifo => Ok(Box::new(FifoPolicy)),
        PolicyKind::Lru => Ok(Box::new(LruPolicy)),
        PolicyKind::Clock => Ok(Box::new(ClockPolicy::new())),
        PolicyKind::Random => Ok(Box::new(RandomPolicy::seeded(seed))),
        PolicyKind::Custom => Err(ConfigError::CustomPolicyNeedsStrategy),
    }
}
