//! Workload driver: sequences of accesses fed to the engine.

use std::fmt;

use crate::{
    common::{AccessKind, PhysicalAddress, ProcessId, VirtualAddress},
    debugger::Component,
    engine::{SimResult, Simulator},
    sim_info,
};

/// Pages touched per process by `default_sweep`.
pub const SWEEP_PAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub pid: ProcessId,
    pub address: VirtualAddress,
    pub kind: AccessKind,
}

impl Access {
    pub fn read(pid: ProcessId, address: VirtualAddress) -> Self {
        Self {
            pid,
            address,
            kind: AccessKind::Read,
        }
    }

    pub fn write(pid: ProcessId, address: VirtualAddress) -> Self {
        Self {
            pid,
            address,
            kind: AccessKind::Write,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "workload error on line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for WorkloadError {}

/// Classroom run: every process, in pid order, reads the start of its
/// first few pages and then comes back to address 0.
pub fn default_sweep(sim: &Simulator) -> Vec<Access> {
    let page_size = sim.page_size();
    let mut accesses = Vec::new();

    for space in sim.processes() {
        let pages = space.num_pages().min(SWEEP_PAGES);
        for page in 0..pages {
            accesses.push(Access::read(space.pid(), page * page_size));
        }
        if space.num_pages() > 0 {
            accesses.push(Access::read(space.pid(), 0));
        }
    }

    accesses
}

/// Parses `<pid> <r|w> <address>` lines. Blank lines and `#` comments are
/// skipped; addresses may be decimal or `0x` hex.
pub fn parse_trace(text: &str) -> Result<Vec<Access>, WorkloadError> {
    let mut accesses = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let err = |message: String| WorkloadError { line, message };

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let [pid, kind, address] = tokens.as_slice() else {
            return Err(err(format!(
                "expected '<pid> <r|w> <address>', got '{}'",
                content
            )));
        };

        let pid = pid
            .parse::<usize>()
            .map_err(|_| err(format!("invalid pid '{}'", pid)))?;
        let kind =
            parse_kind(kind).ok_or_else(|| err(format!("invalid access kind '{}'", kind)))?;
        let address =
            parse_address(address).ok_or_else(|| err(format!("invalid address '{}'", address)))?;

        accesses.push(Access {
            pid: ProcessId(pid),
            address,
            kind,
        });
    }

    Ok(accesses)
}

pub fn parse_kind(token: &str) -> Option<AccessKind> {
    match token.to_lowercase().as_str() {
        "r" | "read" => Some(AccessKind::Read),
        "w" | "write" => Some(AccessKind::Write),
        _ => None,
    }
}

pub fn parse_address(token: &str) -> Option<VirtualAddress> {
    match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Feeds `accesses` to the engine in order, stopping at the first error.
pub fn drive(sim: &mut Simulator, accesses: &[Access]) -> SimResult<Vec<PhysicalAddress>> {
    sim_info!(
        Component::WORKLOAD,
        "running {} accesses under {}",
        accesses.len(),
        sim.policy_name()
    );

    accesses
        .iter()
        .map(|access| sim.translate(access.pid, access.address, access.kind))
        .collect()
}
