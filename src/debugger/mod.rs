pub mod debugger;
mod macros;

pub use debugger::{Component, DebugLevel, get_debug_level, set_debug_level, should_log};
