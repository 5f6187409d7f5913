//! In-memory classification and inventory store.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use motors_core::error::AppError;
use motors_core::result::AppResult;
use motors_entity::inventory::{Classification, NewVehicle, Vehicle};

use crate::store::InventoryStore;

/// Classifications and vehicles keyed by id.
///
/// Vehicles are stored without their classification name; reads join it
/// in, the same way the SQL implementation does.
#[derive(Debug)]
pub struct MemoryInventoryStore {
    classifications: DashMap<i32, Classification>,
    classification_names: DashMap<String, i32>,
    vehicles: DashMap<i32, (i32, NewVehicle)>,
    next_classification_id: AtomicI32,
    next_vehicle_id: AtomicI32,
}

impl MemoryInventoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            classifications: DashMap::new(),
            classification_names: DashMap::new(),
            vehicles: DashMap::new(),
            next_classification_id: AtomicI32::new(1),
            next_vehicle_id: AtomicI32::new(1),
        }
    }

    fn join(&self, id: i32, data: &NewVehicle) -> Option<Vehicle> {
        let classification = self.classifications.get(&data.classification_id)?;
        Some(Vehicle {
            id,
            make: data.make.clone(),
            model: data.model.clone(),
            year: data.year,
            description: data.description.clone(),
            image: data.image.clone(),
            thumbnail: data.thumbnail.clone(),
            price: data.price,
            miles: data.miles,
            color: data.color.clone(),
            classification_id: data.classification_id,
            classification_name: classification.name.clone(),
        })
    }

    fn require_classification(&self, id: i32) -> AppResult<()> {
        if self.classifications.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::validation("Please select a valid classification."))
        }
    }
}

impl Default for MemoryInventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn classifications(&self) -> AppResult<Vec<Classification>> {
        let mut all: Vec<Classification> =
            self.classifications.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_classification(&self, id: i32) -> AppResult<Option<Classification>> {
        Ok(self.classifications.get(&id).map(|r| r.value().clone()))
    }

    async fn add_classification(&self, name: &str) -> AppResult<Classification> {
        let id = match self.classification_names.entry(name.to_lowercase()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Classification '{name}' already exists"
                )));
            }
            Entry::Vacant(slot) => {
                let id = self.next_classification_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let classification = Classification {
            id,
            name: name.to_string(),
        };
        self.classifications.insert(id, classification.clone());
        Ok(classification)
    }

    async fn vehicles_by_classification(
        &self,
        classification_id: i32,
    ) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|r| r.value().1.classification_id == classification_id)
            .filter_map(|r| self.join(r.value().0, &r.value().1))
            .collect();
        vehicles.sort_by_key(|v| v.id);
        Ok(vehicles)
    }

    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let Some(data) = self.vehicles.get(&id).map(|r| r.value().1.clone()) else {
            return Ok(None);
        };
        Ok(self.join(id, &data))
    }

    async fn add_vehicle(&self, data: &NewVehicle) -> AppResult<Vehicle> {
        self.require_classification(data.classification_id)?;

        let id = self.next_vehicle_id.fetch_add(1, Ordering::SeqCst);
        self.vehicles.insert(id, (id, data.clone()));
        self.join(id, data)
            .ok_or_else(|| AppError::validation("Please select a valid classification."))
    }

    async fn update_vehicle(&self, id: i32, data: &NewVehicle) -> AppResult<Option<Vehicle>> {
        self.require_classification(data.classification_id)?;

        match self.vehicles.get_mut(&id) {
            Some(mut row) => row.value_mut().1 = data.clone(),
            None => return Ok(None),
        }
        Ok(self.join(id, data))
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<bool> {
        Ok(self.vehicles.remove(&id).is_some())
    }
}
