use std::collections::BTreeMap;

use pagesim::{
    common::{AccessKind, PageNumber, ProcessId},
    config::{PolicyKind, SimConfig},
    engine::Simulator,
};

pub const PAGE: usize = 4096;

pub struct TestSim {
    pub sim: Simulator,
}

#[allow(dead_code)]
impl TestSim {
    pub fn new(frames: usize, policy: PolicyKind) -> Self {
        super::init_debug_for_tests();
        let config = SimConfig::new(PAGE, frames * PAGE)
            .with_policy(policy)
            .with_seed(0xC0FFEE);
        Self {
            sim: Simulator::new(config).unwrap(),
        }
    }

    pub fn fifo(frames: usize) -> Self {
        Self::new(frames, PolicyKind::Fifo)
    }

    pub fn spawn(&mut self, pages: usize) -> ProcessId {
        self.sim.create_process(pages * PAGE)
    }

    pub fn read(&mut self, pid: ProcessId, va: usize) -> anyhow::Result<usize> {
        Ok(self.sim.translate(pid, va, AccessKind::Read)?)
    }

    pub fn write(&mut self, pid: ProcessId, va: usize) -> anyhow::Result<usize> {
        Ok(self.sim.translate(pid, va, AccessKind::Write)?)
    }

    /// Touches the first byte of each listed page, in order.
    pub fn touch_pages(&mut self, pid: ProcessId, pages: &[usize]) -> anyhow::Result<()> {
        for page in pages {
            self.read(pid, page * PAGE)?;
        }
        Ok(())
    }

    /// frame index -> (pid, page) for every occupied frame.
    pub fn occupancy(&self) -> BTreeMap<usize, (usize, usize)> {
        self.sim
            .frames()
            .filter_map(|(idx, frame)| {
                frame
                    .occupant
                    .map(|occ| (idx.0, (occ.pid.0, occ.page.0)))
            })
            .collect()
    }

    pub fn is_resident(&self, pid: ProcessId, page: usize) -> bool {
        self.sim
            .page(pid, PageNumber(page))
            .map(|p| p.is_present())
            .unwrap_or(false)
    }
}
