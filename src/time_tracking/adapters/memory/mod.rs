//! In-memory adapters for tests and single-process hosts.

mod time_entry;

pub use time_entry::InMemoryTimeEntryRepository;
