//! Time tracking.
//!
//! A user runs at most one timer at a time. Starting a timer persists a
//! running entry; stopping it commits the rounded duration. Entries can
//! also be logged manually with a known duration, and stopped entries roll
//! up into time reports. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The per-user session in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
