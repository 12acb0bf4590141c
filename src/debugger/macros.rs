// src/debugger/macros.rs

#[macro_export]
macro_rules! sim_log {
    ($level:expr, $component:expr, $($arg:tt)*) => {
        if $crate::debugger::debugger::should_log($level) {
            use $crate::debugger::debugger::color::*;
            let level_str = match $level {
                $crate::debugger::debugger::DebugLevel::Error => format!("{}ERROR{}", RED, RESET),
                $crate::debugger::debugger::DebugLevel::Info => format!("{}INFO{}", GREEN, RESET),
                $crate::debugger::debugger::DebugLevel::Debug => format!("{}DEBUG{}", BLUE, RESET),
                $crate::debugger::debugger::DebugLevel::Trace => format!("{}TRACE{}", GRAY, RESET),
                $crate::debugger::debugger::DebugLevel::Off => String::new(),
            };
            eprintln!("{} [{}] {}", level_str, $component, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! sim_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::sim_log!($crate::debugger::debugger::DebugLevel::Error, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! sim_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::sim_log!($crate::debugger::debugger::DebugLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! sim_debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::sim_log!($crate::debugger::debugger::DebugLevel::Debug, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! sim_trace {
    ($component:expr, $($arg:tt)*) => {
        $crate::sim_log!($crate::debugger::debugger::DebugLevel::Trace, $component, $($arg)*)
    };
}
