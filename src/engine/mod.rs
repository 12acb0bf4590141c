pub mod errors;
pub mod events;
pub mod simulator;
pub mod stats;
#[cfg(test)]
mod unit_tests;

pub use errors::{InvariantViolation, SimError, SimResult};
pub use events::Event;
pub use simulator::{Simulator, SimulatorHandle};
pub use stats::Stats;
