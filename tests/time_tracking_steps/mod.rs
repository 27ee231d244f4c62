//! Step definitions for time tracking scenarios.

pub mod given;
pub mod then;
pub mod when;
