//! Foundation utilities: math types, frame timing, and logging setup.

pub mod logging;
pub mod math;
pub mod time;
