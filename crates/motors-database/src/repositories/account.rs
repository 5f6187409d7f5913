//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use motors_core::error::{AppError, ErrorKind};
use motors_core::result::AppResult;
use motors_entity::account::{Account, NewAccount, UpdateAccount};

use crate::store::AccountStore;

/// PostgreSQL-backed credential store.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-index violation on the email to a conflict.
fn email_conflict(e: sqlx::Error, email: &str, context: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict(format!("Email '{email}' is already registered"))
        }
        other => AppError::with_source(ErrorKind::Database, context, other),
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM account WHERE LOWER(account_email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
        })
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM account WHERE account_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn register(&self, data: &NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO account (account_firstname, account_lastname, account_email, account_password) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &data.email, "Failed to register account"))
    }

    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE account SET account_firstname = $1, account_lastname = $2, account_email = $3 \
             WHERE account_id = $4",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(data.id)
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &data.email, "Failed to update account"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE account SET account_password = $1 WHERE account_id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        Ok(result.rows_affected() > 0)
    }
}
