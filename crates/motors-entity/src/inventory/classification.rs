//! Vehicle classification entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vehicle category shown in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Classification {
    /// Unique classification identifier.
    #[sqlx(rename = "classification_id")]
    pub id: i32,
    /// Display name (alphanumeric).
    #[sqlx(rename = "classification_name")]
    pub name: String,
}
