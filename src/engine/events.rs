use crate::{
    common::{
        AccessKind, FrameIndex, LogicalTime, PageNumber, PhysicalAddress, ProcessId, VirtualAddress,
    },
    memory::Occupant,
};

/// One step of an access, in the order the engine performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PageFault {
        time: LogicalTime,
        pid: ProcessId,
        page: PageNumber,
    },

    Evicted {
        time: LogicalTime,
        frame: FrameIndex,
        victim: Occupant,
        policy: &'static str,
    },

    Loaded {
        time: LogicalTime,
        frame: FrameIndex,
        occupant: Occupant,
    },

    Accessed {
        time: LogicalTime,
        pid: ProcessId,
        address: VirtualAddress,
        page: PageNumber,
        frame: FrameIndex,
        physical: PhysicalAddress,
        kind: AccessKind,
    },
}

impl Event {
    pub fn time(&self) -> LogicalTime {
        match self {
            Event::PageFault { time, .. }
            | Event::Evicted { time, .. }
            | Event::Loaded { time, .. }
            | Event::Accessed { time, .. } => *time,
        }
    }
}
