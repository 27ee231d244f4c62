//! Unit tests for the time tracking module.
