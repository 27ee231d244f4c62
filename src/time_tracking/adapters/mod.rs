//! Adapter implementations of the time tracking ports.

pub mod memory;
