//! Entity types shared by every layer of the clinic backend.
//!
//! The structs here are the JSON wire contract as well as the values that
//! flow between services and storage adapters.

pub mod error;
pub mod merge;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use merge::Merge;
pub use structs::{Appointment, Dentist, Patient};
