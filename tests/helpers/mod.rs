pub mod harness;

use std::sync::Once;

use pagesim::debugger::{DebugLevel, set_debug_level};

#[allow(dead_code)]
static INIT: Once = Once::new();

#[allow(dead_code)]
pub fn init_debug_for_tests() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| DebugLevel::from_name(&s))
        .unwrap_or(DebugLevel::Off);

    INIT.call_once(|| {
        set_debug_level(level);
    });
}
