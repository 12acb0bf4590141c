use crate::common::{FrameIndex, LogicalTime, PageNumber, ProcessId};

/// Residency record for one virtual page.
///
/// A page is resident exactly when it holds a frame index, so the
/// `present`/`frame` pair can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    frame: Option<FrameIndex>,
    pub modified: bool,
    pub referenced: bool,
    pub load_time: LogicalTime,
    pub last_access: LogicalTime,
}

impl Page {
    pub fn is_present(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame(&self) -> Option<FrameIndex> {
        self.frame
    }

    /// A freshly loaded page starts clean and unreferenced.
    pub(crate) fn map(&mut self, frame: FrameIndex, time: LogicalTime) {
        self.frame = Some(frame);
        self.modified = false;
        self.referenced = false;
        self.load_time = time;
        self.last_access = time;
    }

    pub(crate) fn unmap(&mut self) {
        self.frame = None;
    }
}

/// Page table of a single simulated process.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    pid: ProcessId,
    size_bytes: usize,
    pages: Vec<Page>,
}

impl AddressSpace {
    pub fn new(pid: ProcessId, size_bytes: usize, page_size: usize) -> Self {
        let num_pages = pages_for(size_bytes, page_size);
        Self {
            pid,
            size_bytes,
            pages: vec![Page::default(); num_pages],
        }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, page: PageNumber) -> Option<&Page> {
        self.pages.get(page.0)
    }

    pub(crate) fn page_mut(&mut self, page: PageNumber) -> Option<&mut Page> {
        self.pages.get_mut(page.0)
    }

    pub fn pages(&self) -> impl Iterator<Item = (PageNumber, &Page)> {
        self.pages
            .iter()
            .enumerate()
            .map(|(idx, page)| (PageNumber(idx), page))
    }

    pub fn resident_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_present()).count()
    }
}

/// Whole pages needed to cover `size_bytes`, rounding up.
pub fn pages_for(size_bytes: usize, page_size: usize) -> usize {
    size_bytes.div_ceil(page_size)
}
