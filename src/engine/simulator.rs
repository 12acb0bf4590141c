use std::sync::{Arc, Mutex};

use crate::{
    common::{
        AccessKind, FrameIndex, LogicalTime, PageNumber, PhysicalAddress, ProcessId,
        VirtualAddress,
    },
    config::SimConfig,
    debugger::Component,
    engine::{
        errors::{InvariantViolation, SimError, SimResult},
        events::Event,
        stats::Stats,
    },
    memory::{AddressSpace, Frame, Occupant, Page, PhysicalMemory},
    policy::{Candidate, PolicyBox, build_policy},
    sim_debug, sim_error, sim_info, sim_trace,
};

/// Callers sharing one engine go through a single lock so the access
/// history stays linear.
pub type SimulatorHandle = Arc<Mutex<Simulator>>;

/// Address-translation and page-replacement engine.
///
/// Owns every page table, the frame pool, the replacement policy and the
/// logical clock. All mutation goes through `&mut self`, one access at a
/// time.
pub struct Simulator {
    config: SimConfig,
    memory: PhysicalMemory,
    processes: Vec<AddressSpace>,
    policy: PolicyBox,

    current_time: LogicalTime,
    total_accesses: u64,
    page_faults: u64,

    events: Vec<Event>,
}

impl Simulator {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        let policy = build_policy(config.policy, config.seed)?;
        Self::with_policy(config, policy)
    }

    /// Builds an engine around an injected strategy, e.g. a `CustomPolicy`.
    pub fn with_policy(config: SimConfig, policy: PolicyBox) -> SimResult<Self> {
        let num_frames = config.frame_count()?;

        sim_info!(
            Component::ENGINE,
            "page size {} bytes, {} frames ({} unusable bytes), policy {}",
            config.page_size,
            num_frames,
            config.unusable_bytes(),
            policy.name()
        );

        Ok(Self {
            memory: PhysicalMemory::new(num_frames, config.page_size),
            processes: Vec::new(),
            policy,
            current_time: 0,
            total_accesses: 0,
            page_faults: 0,
            events: Vec::new(),
            config,
        })
    }

    pub fn into_handle(self) -> SimulatorHandle {
        Arc::new(Mutex::new(self))
    }

    /// Registers a process whose pages all start out non-resident.
    pub fn create_process(&mut self, size_bytes: usize) -> ProcessId {
        let pid = ProcessId(self.processes.len());
        let space = AddressSpace::new(pid, size_bytes, self.config.page_size);

        sim_info!(
            Component::ENGINE,
            "created {}: {} pages ({} bytes)",
            pid,
            space.num_pages(),
            size_bytes
        );

        self.processes.push(space);
        pid
    }

    /// Splits a virtual address into page number and offset.
    pub fn decompose(&self, address: VirtualAddress) -> (PageNumber, usize) {
        let page_size = self.config.page_size;
        (PageNumber(address / page_size), address % page_size)
    }

    /// Performs one complete access: resolves `address`, loading the page
    /// on a fault, records the access and advances the clock.
    ///
    /// Only the page number is checked against the process's table; offsets
    /// inside the last page past `size_bytes` are not rejected.
    pub fn translate(
        &mut self,
        pid: ProcessId,
        address: VirtualAddress,
        kind: AccessKind,
    ) -> SimResult<PhysicalAddress> {
        let (page, offset) = self.decompose(address);
        let resident = self.page_entry(pid, page)?.frame();

        let frame = match resident {
            Some(frame) => frame,
            None => {
                let mark = self.events.len();
                match self.handle_fault(pid, page) {
                    Ok(frame) => frame,
                    Err(err) => {
                        // A failed fault leaves no trace behind.
                        self.events.truncate(mark);
                        if let SimError::Invariant(violation) = &err {
                            sim_error!(
                                Component::ENGINE,
                                "t={} fault on page {} of {} aborted: {}",
                                self.current_time,
                                page,
                                pid,
                                violation
                            );
                        }
                        return Err(err);
                    }
                }
            }
        };

        self.total_accesses += 1;
        if resident.is_none() {
            self.page_faults += 1;
        }

        self.record_access(pid, page, kind)?;

        let physical = self.memory.base_address(frame) + offset;

        sim_trace!(
            Component::ENGINE,
            "t={} {} va {} -> page {} -> frame {} -> pa {}",
            self.current_time,
            pid,
            address,
            page,
            frame,
            physical
        );

        self.events.push(Event::Accessed {
            time: self.current_time,
            pid,
            address,
            page,
            frame,
            physical,
            kind,
        });

        self.current_time += 1;

        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                sim_error!(Component::ENGINE, "invariant broken: {}", violation);
                panic!("invariant broken after access: {violation:?}");
            }
        }

        Ok(physical)
    }

    /// Marks `page` referenced (and modified on writes) at the current time.
    /// `translate` calls this once per access.
    pub fn record_access(
        &mut self,
        pid: ProcessId,
        page: PageNumber,
        kind: AccessKind,
    ) -> SimResult<()> {
        let now = self.current_time;
        let entry = self.page_entry_mut(pid, page)?;

        entry.referenced = true;
        if kind == AccessKind::Write {
            entry.modified = true;
        }
        entry.last_access = now;
        Ok(())
    }

    fn handle_fault(&mut self, pid: ProcessId, page: PageNumber) -> SimResult<FrameIndex> {
        let now = self.current_time;

        sim_debug!(
            Component::ENGINE,
            "t={} page fault: page {} of {} is not resident",
            now,
            page,
            pid
        );
        self.events.push(Event::PageFault {
            time: now,
            pid,
            page,
        });

        let frame = match self.memory.find_free_frame() {
            Some(frame) => frame,
            None => self.evict_victim()?,
        };

        let occupant = Occupant::new(pid, page);
        self.memory.load(frame, occupant, now)?;
        self.page_entry_mut(pid, page)?.map(frame, now);

        sim_debug!(
            Component::MEMORY,
            "t={} loaded page {} of {} into frame {}",
            now,
            page,
            pid,
            frame
        );
        self.events.push(Event::Loaded {
            time: now,
            frame,
            occupant,
        });

        Ok(frame)
    }

    fn evict_victim(&mut self) -> SimResult<FrameIndex> {
        let mut candidates = self.candidates()?;
        let policy = self.policy.name();

        let victim = self
            .policy
            .select_victim(&mut candidates)
            .ok_or(InvariantViolation::NoVictim { policy })?;

        if !candidates.iter().any(|candidate| candidate.frame == victim) {
            return Err(InvariantViolation::FrameOutOfRange {
                frame: victim.0,
                num_frames: self.memory.num_frames(),
            }
            .into());
        }

        for candidate in &candidates {
            self.resident_page_mut(candidate.frame, candidate.occupant)?
                .referenced = candidate.referenced;
        }

        let departing = self.memory.evict(victim)?;
        let entry = self.resident_page_mut(victim, departing)?;
        if entry.frame() != Some(victim) {
            return Err(InvariantViolation::FrameMismatch {
                frame: victim,
                pid: departing.pid,
                page: departing.page,
                page_frame: entry.frame(),
            }
            .into());
        }
        entry.unmap();

        sim_debug!(
            Component::POLICY,
            "t={} {} evicted page {} of {} from frame {}",
            self.current_time,
            policy,
            departing.page,
            departing.pid,
            victim
        );
        self.events.push(Event::Evicted {
            time: self.current_time,
            frame: victim,
            victim: departing,
            policy,
        });

        Ok(victim)
    }

    fn candidates(&self) -> Result<Vec<Candidate>, InvariantViolation> {
        let mut out = Vec::with_capacity(self.memory.num_frames());

        for (frame, slot) in self.memory.frames() {
            let occupant = slot
                .occupant
                .ok_or(InvariantViolation::FreeFrameEvicted { frame: frame.0 })?;
            let page = self.resident_page(frame, occupant)?;

            out.push(Candidate {
                frame,
                occupant,
                load_time: slot.load_time,
                last_access: page.last_access,
                referenced: page.referenced,
            });
        }

        Ok(out)
    }

    fn resident_page(
        &self,
        frame: FrameIndex,
        occupant: Occupant,
    ) -> Result<&Page, InvariantViolation> {
        self.processes
            .get(occupant.pid.0)
            .and_then(|space| space.page(occupant.page))
            .ok_or(InvariantViolation::DanglingOccupant {
                frame,
                pid: occupant.pid,
                page: occupant.page,
            })
    }

    fn resident_page_mut(
        &mut self,
        frame: FrameIndex,
        occupant: Occupant,
    ) -> Result<&mut Page, InvariantViolation> {
        self.processes
            .get_mut(occupant.pid.0)
            .and_then(|space| space.page_mut(occupant.page))
            .ok_or(InvariantViolation::DanglingOccupant {
                frame,
                pid: occupant.pid,
                page: occupant.page,
            })
    }

    fn page_entry(&self, pid: ProcessId, page: PageNumber) -> SimResult<&Page> {
        let space = self.process(pid)?;
        space.page(page).ok_or(SimError::PageOutOfRange {
            pid,
            page,
            num_pages: space.num_pages(),
        })
    }

    fn page_entry_mut(&mut self, pid: ProcessId, page: PageNumber) -> SimResult<&mut Page> {
        let space = self
            .processes
            .get_mut(pid.0)
            .ok_or(SimError::UnknownProcess { pid })?;
        let num_pages = space.num_pages();
        space.page_mut(page).ok_or(SimError::PageOutOfRange {
            pid,
            page,
            num_pages,
        })
    }

    /// Verifies that frame occupancy and page residency describe the same
    /// one-to-one mapping, and that the counters are ordered.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (frame, slot) in self.memory.frames() {
            if let Some(occupant) = slot.occupant {
                let page = self.resident_page(frame, occupant)?;
                if page.frame() != Some(frame) {
                    return Err(InvariantViolation::FrameMismatch {
                        frame,
                        pid: occupant.pid,
                        page: occupant.page,
                        page_frame: page.frame(),
                    });
                }
            }
        }

        for space in &self.processes {
            for (page, entry) in space.pages() {
                let Some(frame) = entry.frame() else {
                    continue;
                };
                let slot = self
                    .memory
                    .frame(frame)
                    .ok_or(InvariantViolation::FrameOutOfRange {
                        frame: frame.0,
                        num_frames: self.memory.num_frames(),
                    })?;
                if slot.occupant != Some(Occupant::new(space.pid(), page)) {
                    return Err(InvariantViolation::OrphanPage {
                        pid: space.pid(),
                        page,
                        frame,
                    });
                }
            }
        }

        if self.page_faults > self.total_accesses {
            return Err(InvariantViolation::FaultsExceedAccesses {
                page_faults: self.page_faults,
                total_accesses: self.total_accesses,
            });
        }

        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn current_time(&self) -> LogicalTime {
        self.current_time
    }

    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_accesses: self.total_accesses,
            page_faults: self.page_faults,
            current_time: self.current_time,
            num_frames: self.memory.num_frames(),
            num_processes: self.processes.len(),
            policy: self.policy.name(),
        }
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    pub fn frames(&self) -> impl Iterator<Item = (FrameIndex, &Frame)> {
        self.memory.frames()
    }

    pub fn process(&self, pid: ProcessId) -> SimResult<&AddressSpace> {
        self.processes
            .get(pid.0)
            .ok_or(SimError::UnknownProcess { pid })
    }

    pub fn processes(&self) -> &[AddressSpace] {
        &self.processes
    }

    pub fn page(&self, pid: ProcessId, page: PageNumber) -> SimResult<&Page> {
        self.page_entry(pid, page)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn memory_mut(&mut self) -> &mut PhysicalMemory {
        &mut self.memory
    }

    #[cfg(test)]
    pub(crate) fn page_mut(&mut self, pid: ProcessId, page: PageNumber) -> SimResult<&mut Page> {
        self.page_entry_mut(pid, page)
    }
}
