//! Custom Axum extractors.

pub mod identity;
pub mod path;

pub use identity::{CurrentAccount, Identity};
pub use path::parse_id;
