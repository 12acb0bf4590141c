pub mod config;

pub mod common;
pub mod debugger;
pub mod engine;
pub mod memory;
pub mod policy;
pub mod report;
pub mod workload;
