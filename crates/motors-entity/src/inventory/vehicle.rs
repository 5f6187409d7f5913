//! Inventory item entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vehicle in inventory, joined with its classification name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    /// Unique inventory identifier.
    #[sqlx(rename = "inv_id")]
    pub id: i32,
    /// Manufacturer.
    #[sqlx(rename = "inv_make")]
    pub make: String,
    /// Model name.
    #[sqlx(rename = "inv_model")]
    pub model: String,
    /// Model year.
    #[sqlx(rename = "inv_year")]
    pub year: i32,
    /// Free-form description.
    #[sqlx(rename = "inv_description")]
    pub description: String,
    /// Full-size image path.
    #[sqlx(rename = "inv_image")]
    pub image: String,
    /// Thumbnail image path.
    #[sqlx(rename = "inv_thumbnail")]
    pub thumbnail: String,
    /// Asking price in dollars.
    #[sqlx(rename = "inv_price")]
    pub price: f64,
    /// Odometer reading.
    #[sqlx(rename = "inv_miles")]
    pub miles: i32,
    /// Exterior color.
    #[sqlx(rename = "inv_color")]
    pub color: String,
    /// Owning classification.
    pub classification_id: i32,
    /// Name of the owning classification.
    pub classification_name: String,
}

impl Vehicle {
    /// `"{make} {model}"`, used in titles and alt text.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Data required to create or replace an inventory item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Free-form description.
    pub description: String,
    /// Full-size image path.
    pub image: String,
    /// Thumbnail image path.
    pub thumbnail: String,
    /// Asking price in dollars.
    pub price: f64,
    /// Odometer reading.
    pub miles: i32,
    /// Exterior color.
    pub color: String,
    /// Owning classification.
    pub classification_id: i32,
}
