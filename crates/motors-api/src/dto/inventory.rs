//! Classification and vehicle forms.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use motors_entity::inventory::{NewVehicle, Vehicle};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Letters and digits only, no spaces.
pub fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(
            "alphanumeric",
            "Classification name cannot contain spaces or special characters.",
        ));
    }
    Ok(())
}

fn validate_year(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(year) if (1900..=2099).contains(&year) => Ok(()),
        _ => Err(invalid(
            "year",
            "Year must be a valid number between 1900 and 2099.",
        )),
    }
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(()),
        _ => Err(invalid("price", "Price must be a positive number.")),
    }
}

fn validate_miles(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(miles) if miles >= 0 => Ok(()),
        _ => Err(invalid("miles", "Miles must be a positive integer.")),
    }
}

fn validate_classification_id(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i32>() {
        Ok(id) if id >= 1 => Ok(()),
        _ => Err(invalid(
            "classification",
            "Please select a valid classification.",
        )),
    }
}

/// `POST /inv/add-classification`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClassificationForm {
    /// New classification name.
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Please provide a classification name."),
        custom(function = "validate_alphanumeric")
    )]
    pub classification_name: String,
}

impl ClassificationForm {
    /// Trims the name.
    pub fn normalized(self) -> Self {
        Self {
            classification_name: self.classification_name.trim().to_string(),
        }
    }
}

/// `POST /inv/add-inventory` and `POST /inv/update`.
///
/// Numeric fields stay text until validated so a bad value re-renders the
/// form instead of rejecting the body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VehicleForm {
    /// Present on update only.
    #[serde(default)]
    pub inv_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a make."))]
    pub inv_make: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a model."))]
    pub inv_model: String,
    #[serde(default)]
    #[validate(custom(function = "validate_year"))]
    pub inv_year: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a description."))]
    pub inv_description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide an image path."))]
    pub inv_image: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a thumbnail path."))]
    pub inv_thumbnail: String,
    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    pub inv_price: String,
    #[serde(default)]
    #[validate(custom(function = "validate_miles"))]
    pub inv_miles: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a color."))]
    pub inv_color: String,
    #[serde(default)]
    #[validate(custom(function = "validate_classification_id"))]
    pub classification_id: String,
}

impl VehicleForm {
    /// Trims every text field.
    pub fn normalized(self) -> Self {
        Self {
            inv_id: self.inv_id,
            inv_make: self.inv_make.trim().to_string(),
            inv_model: self.inv_model.trim().to_string(),
            inv_year: self.inv_year.trim().to_string(),
            inv_description: self.inv_description.trim().to_string(),
            inv_image: self.inv_image.trim().to_string(),
            inv_thumbnail: self.inv_thumbnail.trim().to_string(),
            inv_price: self.inv_price.trim().to_string(),
            inv_miles: self.inv_miles.trim().to_string(),
            inv_color: self.inv_color.trim().to_string(),
            classification_id: self.classification_id.trim().to_string(),
        }
    }

    /// Pre-fills the form from a stored vehicle.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            inv_id: Some(vehicle.id),
            inv_make: vehicle.make.clone(),
            inv_model: vehicle.model.clone(),
            inv_year: vehicle.year.to_string(),
            inv_description: vehicle.description.clone(),
            inv_image: vehicle.image.clone(),
            inv_thumbnail: vehicle.thumbnail.clone(),
            inv_price: vehicle.price.to_string(),
            inv_miles: vehicle.miles.to_string(),
            inv_color: vehicle.color.clone(),
            classification_id: vehicle.classification_id.to_string(),
        }
    }

    /// Selected classification, if the field parses.
    pub fn selected_classification(&self) -> Option<i32> {
        self.classification_id.parse().ok()
    }

    /// Converts a validated form into store input.
    ///
    /// Returns `None` if a numeric field does not parse, which cannot
    /// happen once [`validate_form`](super::validate_form) came back empty.
    pub fn to_new_vehicle(&self) -> Option<NewVehicle> {
        Some(NewVehicle {
            make: self.inv_make.clone(),
            model: self.inv_model.clone(),
            year: self.inv_year.parse().ok()?,
            description: self.inv_description.clone(),
            image: self.inv_image.clone(),
            thumbnail: self.inv_thumbnail.clone(),
            price: self.inv_price.parse().ok()?,
            miles: self.inv_miles.parse().ok()?,
            color: self.inv_color.clone(),
            classification_id: self.classification_id.parse().ok()?,
        })
    }
}

/// `POST /inv/delete`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteVehicleForm {
    /// Vehicle to delete.
    #[serde(default)]
    pub inv_id: i32,
}
