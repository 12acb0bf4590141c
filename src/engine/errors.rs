use std::fmt;

use crate::{
    common::{FrameIndex, PageNumber, ProcessId},
    config::ConfigError,
    memory::MemoryError,
};

/// The frame table and the page tables disagree, or a policy misbehaved.
/// Always an engine bug, never a caller mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    FreeFrameEvicted {
        frame: usize,
    },

    FrameOutOfRange {
        frame: usize,
        num_frames: usize,
    },

    DanglingOccupant {
        frame: FrameIndex,
        pid: ProcessId,
        page: PageNumber,
    },

    FrameMismatch {
        frame: FrameIndex,
        pid: ProcessId,
        page: PageNumber,
        page_frame: Option<FrameIndex>,
    },

    OrphanPage {
        pid: ProcessId,
        page: PageNumber,
        frame: FrameIndex,
    },

    NoVictim {
        policy: &'static str,
    },

    FaultsExceedAccesses {
        page_faults: u64,
        total_accesses: u64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::FreeFrameEvicted { frame } => {
                write!(f, "invariant violated: evicted free frame {}", frame)
            }

            InvariantViolation::FrameOutOfRange { frame, num_frames } => {
                write!(
                    f,
                    "invariant violated: frame {} out of range ({} frames)",
                    frame, num_frames
                )
            }

            InvariantViolation::DanglingOccupant { frame, pid, page } => {
                write!(
                    f,
                    "invariant violated: frame {} holds {}-{} which does not exist",
                    frame, pid, page
                )
            }

            InvariantViolation::FrameMismatch {
                frame,
                pid,
                page,
                page_frame,
            } => {
                let claimed = page_frame
                    .map(|fr| fr.to_string())
                    .unwrap_or_else(|| "none".to_string());
                write!(
                    f,
                    "invariant violated: frame {} holds {}-{} but the page maps to frame {}",
                    frame, pid, page, claimed
                )
            }

            InvariantViolation::OrphanPage { pid, page, frame } => {
                write!(
                    f,
                    "invariant violated: {}-{} maps to frame {} which does not hold it",
                    pid, page, frame
                )
            }

            InvariantViolation::NoVictim { policy } => {
                write!(f, "invariant violated: {} policy chose no victim", policy)
            }

            InvariantViolation::FaultsExceedAccesses {
                page_faults,
                total_accesses,
            } => {
                write!(
                    f,
                    "invariant violated: {} page faults for {} accesses",
                    page_faults, total_accesses
                )
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl From<MemoryError> for InvariantViolation {
    fn from(e: MemoryError) -> Self {
        match e {
            MemoryError::FrameNotOccupied { frame } => InvariantViolation::FreeFrameEvicted { frame },
            MemoryError::FrameOutOfRange { frame, num_frames } => {
                InvariantViolation::FrameOutOfRange { frame, num_frames }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    Config(ConfigError),

    UnknownProcess {
        pid: ProcessId,
    },

    PageOutOfRange {
        pid: ProcessId,
        page: PageNumber,
        num_pages: usize,
    },

    Invariant(InvariantViolation),
}

pub type SimResult<T> = Result<T, SimError>;

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Config(e) => write!(f, "{e}"),
            SimError::UnknownProcess { pid } => write!(f, "unknown process {}", pid),
            SimError::PageOutOfRange {
                pid,
                page,
                num_pages,
            } => write!(
                f,
                "page {} is outside {} ({} pages)",
                page, pid, num_pages
            ),
            SimError::Invariant(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Config(e)
    }
}

impl From<InvariantViolation> for SimError {
    fn from(e: InvariantViolation) -> Self {
        SimError::Invariant(e)
    }
}

impl From<MemoryError> for SimError {
    fn from(e: MemoryError) -> Self {
        SimError::Invariant(e.into())
    }
}
