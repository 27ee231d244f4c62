//! Unit tests for the task status module.
