pub mod ids;

pub use ids::{
    AccessKind, FrameIndex, LogicalTime, PageNumber, PhysicalAddress, ProcessId, VirtualAddress,
};
