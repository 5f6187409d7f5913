//! Vehicle classification and inventory entities.

pub mod classification;
pub mod vehicle;

pub use classification::Classification;
pub use vehicle::{NewVehicle, Vehicle};
