//! Read-only text views of engine state.

use std::fmt::Write;

use crate::{
    common::ProcessId,
    engine::{Event, SimResult, Simulator, Stats},
};

const CELL_RULE: &str = "--------";

/// One boxed row per frame: `P<pid>-<page>` or `----` when free.
pub fn memory_map(sim: &Simulator) -> String {
    let mut out = String::from("Physical memory:\n");

    for (_, frame) in sim.frames() {
        let _ = writeln!(out, "{}", CELL_RULE);
        match frame.occupant {
            Some(occupant) => {
                let _ = writeln!(out, "| {}-{} |", occupant.pid, occupant.page);
            }
            None => out.push_str("| ---- |\n"),
        }
    }
    let _ = writeln!(out, "{}", CELL_RULE);

    out
}

pub fn statistics(stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "======== SIMULATION STATISTICS ========");
    let _ = writeln!(out, "Total memory accesses: {}", stats.total_accesses);
    let _ = writeln!(out, "Total page faults: {}", stats.page_faults);
    let _ = writeln!(out, "Page fault rate: {:.2}%", stats.fault_rate());
    let _ = writeln!(out, "Policy: {}", stats.policy);
    out
}

/// One line per event: faults and replacements, then the
/// `va -> page -> frame -> pa` chain of each completed access.
pub fn access_log(events: &[Event]) -> String {
    let mut out = String::new();

    for event in events {
        let _ = match event {
            Event::PageFault { time, pid, page } => {
                writeln!(out, "t={} page fault: {} page {}", time, pid, page)
            }
            Event::Evicted {
                time,
                frame,
                victim,
                policy,
            } => writeln!(
                out,
                "t={} {} evicted {}-{} from frame {}",
                time, policy, victim.pid, victim.page, frame
            ),
            Event::Loaded {
                time,
                frame,
                occupant,
            } => writeln!(
                out,
                "t={} loaded {}-{} into frame {}",
                time, occupant.pid, occupant.page, frame
            ),
            Event::Accessed {
                time,
                pid,
                address,
                page,
                frame,
                physical,
                kind,
            } => writeln!(
                out,
                "t={} {} {} va {} -> page {} -> frame {} -> pa {}",
                time, pid, kind, address, page, frame, physical
            ),
        };
    }

    out
}

/// Residency, bits and timestamps of every page of `pid`.
pub fn page_table(sim: &Simulator, pid: ProcessId) -> SimResult<String> {
    let space = sim.process(pid)?;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {} bytes, {} pages, {} resident",
        pid,
        space.size_bytes(),
        space.num_pages(),
        space.resident_pages()
    );
    let _ = writeln!(out, "page  frame  R  M  loaded  last");

    for (page, entry) in space.pages() {
        let frame = entry
            .frame()
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:>5}  {}  {}  {:>6}  {:>4}",
            page.0,
            frame,
            entry.referenced as u8,
            entry.modified as u8,
            entry.load_time,
            entry.last_access
        );
    }

    Ok(out)
}
