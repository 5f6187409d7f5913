//! Account domain entities.

pub mod model;
pub mod role;

pub use model::{Account, AccountProfile, NewAccount, UpdateAccount};
pub use role::AccountType;
