//! In-memory store implementations.
//!
//! Used by the test suites and by `database.backend = "memory"`. Contents
//! live only as long as the process.

pub mod account;
pub mod inventory;

pub use account::MemoryAccountStore;
pub use inventory::MemoryInventoryStore;
