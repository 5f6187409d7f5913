//! PostgreSQL repository implementations of the store traits.

pub mod account;
pub mod inventory;

pub use account::AccountRepository;
pub use inventory::InventoryRepository;
