use crate::{
    common::{FrameIndex, LogicalTime, PageNumber, PhysicalAddress, ProcessId},
    memory::errors::{MemoryError, MemoryResult},
};

/// The page currently held by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub pid: ProcessId,
    pub page: PageNumber,
}

impl Occupant {
    pub fn new(pid: ProcessId, page: PageNumber) -> Self {
        Self { pid, page }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub occupant: Option<Occupant>,
    pub load_time: LogicalTime,
}

impl Frame {
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// Fixed pool of physical frames.
#[derive(Debug)]
pub struct PhysicalMemory {
    frames: Vec<Frame>,
    page_size: usize,
}

impl PhysicalMemory {
    pub fn new(num_frames: usize, page_size: usize) -> Self {
        Self {
            frames: vec![Frame::default(); num_frames],
            page_size,
        }
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Lowest-indexed free frame, if any.
    pub fn find_free_frame(&self) -> Option<FrameIndex> {
        self.frames.iter().position(Frame::is_free).map(FrameIndex)
    }

    /// Places `occupant` in `frame`. Any previous occupant is overwritten;
    /// callers evict first.
    pub fn load(
        &mut self,
        frame: FrameIndex,
        occupant: Occupant,
        time: LogicalTime,
    ) -> MemoryResult<()> {
        let slot = self.slot_mut(frame)?;
        slot.occupant = Some(occupant);
        slot.load_time = time;
        Ok(())
    }

    /// Clears `frame` and hands back the page that left it.
    pub fn evict(&mut self, frame: FrameIndex) -> MemoryResult<Occupant> {
        self.slot_mut(frame)?
            .occupant
            .take()
            .ok_or(MemoryError::FrameNotOccupied { frame: frame.0 })
    }

    pub fn frame(&self, frame: FrameIndex) -> Option<&Frame> {
        self.frames.get(frame.0)
    }

    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, &Frame)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, frame)| (FrameIndex(idx), frame))
    }

    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|f| !f.is_free()).count()
    }

    pub fn is_full(&self) -> bool {
        self.frames.iter().all(|f| !f.is_free())
    }

    pub fn base_address(&self, frame: FrameIndex) -> PhysicalAddress {
        frame.0 * self.page_size
    }

    fn slot_mut(&mut self, frame: FrameIndex) -> MemoryResult<&mut Frame> {
        let num_frames = self.frames.len();
        self.frames
            .get_mut(frame.0)
            .ok_or(MemoryError::FrameOutOfRange {
                frame: frame.0,
                num_frames,
            })
    }
}
