//! Store traits consumed by the auth core and the HTTP handlers.
//!
//! Each operation is a single-row read or write; the backing store is
//! responsible for atomicity of that row. Concurrent writes to the same row
//! are last-write-wins.

use async_trait::async_trait;

use motors_core::result::AppResult;
use motors_entity::account::{Account, NewAccount, UpdateAccount};
use motors_entity::inventory::{Classification, NewVehicle, Vehicle};

/// Persistence of account rows.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find an account by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find an account by primary key.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>>;

    /// Insert a new `Client` account. A taken email is `ErrorKind::Conflict`.
    async fn register(&self, data: &NewAccount) -> AppResult<Account>;

    /// Replace names and email. Returns `false` when no row matched.
    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<bool>;

    /// Replace the password digest. Returns `false` when no row matched.
    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<bool>;
}

/// Persistence of classifications and inventory items.
#[async_trait]
pub trait InventoryStore: Send + Sync + 'static {
    /// All classifications ordered by name.
    async fn classifications(&self) -> AppResult<Vec<Classification>>;

    /// Find a classification by primary key.
    async fn find_classification(&self, id: i32) -> AppResult<Option<Classification>>;

    /// Insert a classification. A duplicate name is `ErrorKind::Conflict`.
    async fn add_classification(&self, name: &str) -> AppResult<Classification>;

    /// Vehicles of one classification ordered by id.
    async fn vehicles_by_classification(&self, classification_id: i32)
    -> AppResult<Vec<Vehicle>>;

    /// Find a vehicle by primary key.
    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>>;

    /// Insert a vehicle. An unknown classification is `ErrorKind::Validation`.
    async fn add_vehicle(&self, data: &NewVehicle) -> AppResult<Vehicle>;

    /// Replace every field of a vehicle. `None` when no row matched.
    async fn update_vehicle(&self, id: i32, data: &NewVehicle) -> AppResult<Option<Vehicle>>;

    /// Delete a vehicle. Returns `false` when no row matched.
    async fn delete_vehicle(&self, id: i32) -> AppResult<bool>;
}
