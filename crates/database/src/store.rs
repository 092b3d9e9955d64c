//! Storage adapter interfaces, one per entity.
//!
//! Adapters translate entity operations into queries and report a missing
//! row as [`DbError::NotFound`]. They carry no business rules.

use crate::error::DbError;
use async_trait::async_trait;
use core_types::{Appointment, Dentist, Patient};

#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn read(&self, id: i64) -> Result<Patient, DbError>;
    async fn read_by_dni(&self, dni: i64) -> Result<Patient, DbError>;
    async fn read_all(&self) -> Result<Vec<Patient>, DbError>;
    /// Inserts the patient, ignoring `patient.id`, and returns the assigned id.
    async fn create(&self, patient: &Patient) -> Result<i64, DbError>;
    /// Overwrites every column of the row identified by `patient.id`.
    async fn update(&self, patient: &Patient) -> Result<(), DbError>;
    async fn delete(&self, id: i64) -> Result<(), DbError>;
    async fn exists(&self, dni: i64) -> Result<bool, DbError>;
}

#[async_trait]
pub trait DentistStore: Send + Sync {
    async fn read(&self, id: i64) -> Result<Dentist, DbError>;
    async fn read_by_license(&self, license: &str) -> Result<Dentist, DbError>;
    async fn read_all(&self) -> Result<Vec<Dentist>, DbError>;
    /// Inserts the dentist, ignoring `dentist.id`, and returns the assigned id.
    async fn create(&self, dentist: &Dentist) -> Result<i64, DbError>;
    async fn update(&self, dentist: &Dentist) -> Result<(), DbError>;
    async fn delete(&self, id: i64) -> Result<(), DbError>;
    async fn exists(&self, license: &str) -> Result<bool, DbError>;
}

/// Appointments are persisted as foreign keys and read back joined with the
/// patient and dentist they reference.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn read(&self, id: i64) -> Result<Appointment, DbError>;
    /// The first appointment (lowest id) of the patient holding `dni`.
    async fn read_by_dni(&self, dni: i64) -> Result<Appointment, DbError>;
    async fn read_all(&self) -> Result<Vec<Appointment>, DbError>;
    /// Inserts a row linking `appointment.patient.id` and
    /// `appointment.dentist.id` and returns the assigned id.
    async fn create(&self, appointment: &Appointment) -> Result<i64, DbError>;
    async fn update(&self, appointment: &Appointment) -> Result<(), DbError>;
    async fn delete(&self, id: i64) -> Result<(), DbError>;

    // Lookups used to resolve the records an appointment links.
    async fn patient_by_id(&self, id: i64) -> Result<Patient, DbError>;
    async fn patient_by_dni(&self, dni: i64) -> Result<Patient, DbError>;
    async fn dentist_by_id(&self, id: i64) -> Result<Dentist, DbError>;
    async fn dentist_by_license(&self, license: &str) -> Result<Dentist, DbError>;
}
