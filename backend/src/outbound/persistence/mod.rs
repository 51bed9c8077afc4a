//! Persistence adapters implementing the record store ports.
//!
//! The in-memory adapter backs every store port with one shared state so
//! roster commits can span students and courses atomically. A relational
//! adapter would implement the same ports and issue one transaction per
//! `RosterRepository::commit`.

mod in_memory_store;

pub use in_memory_store::InMemoryCampusStore;
