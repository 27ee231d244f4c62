//! Task status management.
//!
//! Tasks move between the `doing`, `for_review`, `done`, and `deferred`
//! statuses without restriction, and task lists are projected onto kanban
//! boards with one column per status. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
