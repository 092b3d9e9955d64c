//! # Clinic Database Crate
//!
//! This crate holds the storage adapters of the clinic backend: the only code
//! that knows how patients, dentists and appointments are laid out in the
//! relational store.
//!
//! ## Public API
//!
//! - `PatientStore`, `DentistStore`, `AppointmentStore`: the per-entity
//!   adapter interfaces the repositories consume.
//! - `PgStore`: the PostgreSQL implementation of all three.
//! - `MemoryStore`: an in-process implementation with the same constraints.
//! - `connect` / `run_migrations`: pool setup and schema migrations.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{AppointmentStore, DentistStore, PatientStore};
