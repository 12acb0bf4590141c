use crate::common::LogicalTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total_accesses: u64,
    pub page_faults: u64,
    pub current_time: LogicalTime,
    pub num_frames: usize,
    pub num_processes: usize,
    pub policy: &'static str,
}

impl Stats {
    /// Faults per hundred accesses; zero before the first access.
    pub fn fault_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            return 0.0;
        }
        100.0 * self.page_faults as f64 / self.total_accesses as f64
    }

    pub fn hits(&self) -> u64 {
        self.total_accesses.saturating_sub(self.page_faults)
    }
}
