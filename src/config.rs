//! Run configuration. Fixed once a `Simulator` is built.

use std::{fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: usize = 4096;
pub const DEFAULT_PHYSICAL_SIZE: usize = 16384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fifo,
    Lru,
    Clock,
    Random,
    Custom,
}

impl PolicyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Clock => "CLOCK",
            PolicyKind::Random => "RANDOM",
            PolicyKind::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "clock" => Ok(PolicyKind::Clock),
            "random" => Ok(PolicyKind::Random),
            "custom" => Ok(PolicyKind::Custom),
            other => Err(ConfigError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroPageSize,
    MemorySmallerThanPage { physical: usize, page_size: usize },
    CustomPolicyNeedsStrategy,
    UnknownPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroPageSize => write!(f, "config error: page size must be positive"),
            ConfigError::MemorySmallerThanPage {
                physical,
                page_size,
            } => write!(
                f,
                "config error: physical memory ({} bytes) cannot hold one page ({} bytes)",
                physical, page_size
            ),
            ConfigError::CustomPolicyNeedsStrategy => write!(
                f,
                "config error: CUSTOM policy requires an injected strategy"
            ),
            ConfigError::UnknownPolicy(name) => {
                write!(f, "config error: unknown replacement policy '{}'", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub page_size: usize,
    pub physical_size: usize,
    pub policy: PolicyKind,
    /// Seed for the RANDOM policy.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            physical_size: DEFAULT_PHYSICAL_SIZE,
            policy: PolicyKind::Fifo,
            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn new(page_size: usize, physical_size: usize) -> Self {
        Self {
            page_size,
            physical_size,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of whole frames. Fails instead of producing zero frames.
    pub fn frame_count(&self) -> Result<usize, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.physical_size < self.page_size {
            return Err(ConfigError::MemorySmallerThanPage {
                physical: self.physical_size,
                page_size: self.page_size,
            });
        }
        Ok(self.physical_size / self.page_size)
    }

    /// Trailing bytes of physical memory that do not fill a whole frame.
    pub fn unusable_bytes(&self) -> usize {
        if self.page_size == 0 {
            return self.physical_size;
        }
        self.physical_size % self.page_size
    }
}
