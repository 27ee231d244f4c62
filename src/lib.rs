//! Clientdesk: time tracking and task status core for a service-provider CRM.
//!
//! The crate holds the stateful logic behind the CRM user interface: a
//! single-active-timer time tracking session and the task status machine
//! that drives kanban boards. Presentation, routing, and persistence
//! back-ends live elsewhere and plug in through ports.
//!
//! # Architecture
//!
//! Clientdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   notification sinks)
//!
//! # Modules
//!
//! - [`time_tracking`]: Timer sessions, manual entries, and time reports
//! - [`task`]: Task status transitions and kanban projection
//! - [`notification`]: User-facing success and error notifications
//! - [`ids`]: Identifiers for clients, projects, and users
//! - [`config`] and [`telemetry`]: Runtime configuration and logging setup

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod notification;
pub mod task;
pub mod telemetry;
pub mod time_tracking;
