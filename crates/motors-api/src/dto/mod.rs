//! Form bodies and their validation rules.

pub mod account;
pub mod field_error;
pub mod inventory;

pub use account::{AccountUpdateForm, LoginForm, PasswordChangeForm, RegisterForm};
pub use field_error::{FieldError, validate_form};
pub use inventory::{ClassificationForm, DeleteVehicleForm, VehicleForm};
