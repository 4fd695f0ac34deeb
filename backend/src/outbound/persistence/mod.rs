//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel row structs and domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: database failures are classified once
//!   (`db_failure.rs`) and mapped to each port's error type.

mod credentials_auth_service;
mod db_failure;
mod diesel_invoice_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use credentials_auth_service::CredentialsAuthService;
pub use diesel_invoice_repository::DieselInvoiceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
