//! Shared utilities that are not tied to windowing or rendering

pub mod math;
pub mod time;
