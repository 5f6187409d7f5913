//! # motors-entity
//!
//! Domain entity models for CSE Motors. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` and keep the column names of the
//! original schema through `#[sqlx(rename)]`.

pub mod account;
pub mod inventory;
