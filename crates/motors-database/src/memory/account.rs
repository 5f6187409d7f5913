//! In-memory credential store.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use motors_core::error::AppError;
use motors_core::result::AppResult;
use motors_entity::account::{Account, AccountType, NewAccount, UpdateAccount};

use crate::store::AccountStore;

/// Account rows keyed by id, plus a lowercase email index that enforces
/// uniqueness atomically through the map's entry API.
#[derive(Debug)]
pub struct MemoryAccountStore {
    accounts: DashMap<i32, Account>,
    emails: DashMap<String, i32>,
    next_id: AtomicI32,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            emails: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Promotes or demotes an account. Returns `false` when no row matched.
    ///
    /// Roles are never changed through the web forms; PostgreSQL
    /// deployments seed staff roles directly in the `account` table.
    pub fn set_account_type(&self, id: i32, account_type: AccountType) -> bool {
        match self.accounts.get_mut(&id) {
            Some(mut account) => {
                account.account_type = account_type;
                true
            }
            None => false,
        }
    }
}

impl Default for MemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let Some(id) = self.emails.get(&email_key(email)).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn register(&self, data: &NewAccount) -> AppResult<Account> {
        let id = match self.emails.entry(email_key(&data.email)) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Email '{}' is already registered",
                    data.email
                )));
            }
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                slot.insert(id);
                id
            }
        };

        let account = Account {
            id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            account_type: AccountType::Client,
        };
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn update_profile(&self, data: &UpdateAccount) -> AppResult<bool> {
        let Some(old_email) = self.accounts.get(&data.id).map(|r| r.email.clone()) else {
            return Ok(false);
        };

        let old_key = email_key(&old_email);
        let new_key = email_key(&data.email);
        if old_key != new_key {
            match self.emails.entry(new_key) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Email '{}' is already registered",
                        data.email
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(data.id);
                }
            }
            self.emails.remove(&old_key);
        }

        match self.accounts.get_mut(&data.id) {
            Some(mut account) => {
                account.first_name = data.first_name.clone();
                account.last_name = data.last_name.clone();
                account.email = data.email.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> AppResult<bool> {
        match self.accounts.get_mut(&id) {
            Some(mut account) => {
                account.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
