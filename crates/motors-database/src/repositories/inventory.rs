//! Classification and inventory repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use motors_core::error::{AppError, ErrorKind};
use motors_core::result::AppResult;
use motors_entity::inventory::{Classification, NewVehicle, Vehicle};

use crate::store::InventoryStore;

/// Selects a vehicle row joined with its classification name.
const VEHICLE_SELECT: &str = "SELECT i.*, c.classification_name \
     FROM inventory i JOIN classification c ON i.classification_id = c.classification_id";

/// PostgreSQL-backed inventory store.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    /// Create a new inventory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a foreign-key violation on the classification to a validation error.
fn vehicle_write_error(e: sqlx::Error, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::validation("Please select a valid classification.")
        }
        other => AppError::with_source(ErrorKind::Database, context, other),
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn classifications(&self) -> AppResult<Vec<Classification>> {
        sqlx::query_as::<_, Classification>(
            "SELECT * FROM classification ORDER BY classification_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list classifications", e))
    }

    async fn find_classification(&self, id: i32) -> AppResult<Option<Classification>> {
        sqlx::query_as::<_, Classification>(
            "SELECT * FROM classification WHERE classification_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find classification", e))
    }

    async fn add_classification(&self, name: &str) -> AppResult<Classification> {
        sqlx::query_as::<_, Classification>(
            "INSERT INTO classification (classification_name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Classification '{name}' already exists"))
            }
            other => {
                AppError::with_source(ErrorKind::Database, "Failed to add classification", other)
            }
        })
    }

    async fn vehicles_by_classification(
        &self,
        classification_id: i32,
    ) -> AppResult<Vec<Vehicle>> {
        let sql = format!("{VEHICLE_SELECT} WHERE i.classification_id = $1 ORDER BY i.inv_id");
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(classification_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list vehicles", e))
    }

    async fn find_vehicle(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let sql = format!("{VEHICLE_SELECT} WHERE i.inv_id = $1");
        sqlx::query_as::<_, Vehicle>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find vehicle", e))
    }

    async fn add_vehicle(&self, data: &NewVehicle) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "WITH inserted AS ( \
                INSERT INTO inventory (inv_make, inv_model, inv_year, inv_description, inv_image, \
                    inv_thumbnail, inv_price, inv_miles, inv_color, classification_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING * \
             ) \
             SELECT inserted.*, c.classification_name FROM inserted \
             JOIN classification c ON inserted.classification_id = c.classification_id",
        )
        .bind(&data.make)
        .bind(&data.model)
        .bind(data.year)
        .bind(&data.description)
        .bind(&data.image)
        .bind(&data.thumbnail)
        .bind(data.price)
        .bind(data.miles)
        .bind(&data.color)
        .bind(data.classification_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| vehicle_write_error(e, "Failed to add vehicle"))
    }

    async fn update_vehicle(&self, id: i32, data: &NewVehicle) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            "WITH updated AS ( \
                UPDATE inventory SET inv_make = $1, inv_model = $2, inv_year = $3, \
                    inv_description = $4, inv_image = $5, inv_thumbnail = $6, inv_price = $7, \
                    inv_miles = $8, inv_color = $9, classification_id = $10 \
                WHERE inv_id = $11 RETURNING * \
             ) \
             SELECT updated.*, c.classification_name FROM updated \
             JOIN classification c ON updated.classification_id = c.classification_id",
        )
        .bind(&data.make)
        .bind(&data.model)
        .bind(data.year)
        .bind(&data.description)
        .bind(&data.image)
        .bind(&data.thumbnail)
        .bind(data.price)
        .bind(data.miles)
        .bind(&data.color)
        .bind(data.classification_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| vehicle_write_error(e, "Failed to update vehicle"))
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inventory WHERE inv_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete vehicle", e))?;

        Ok(result.rows_affected() > 0)
    }
}
