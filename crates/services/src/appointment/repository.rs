use super::ENTITY;
use crate::{error::ServiceError, policy};
use core_types::{Appointment, Dentist, Patient};
use database::AppointmentStore;
use std::sync::Arc;

/// Wraps the appointment store, including the lookups that resolve the
/// patient and dentist an appointment links.
#[derive(Clone)]
pub struct AppointmentRepository {
    store: Arc<dyn AppointmentStore>,
}

impl AppointmentRepository {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Appointment>, ServiceError> {
        policy::list_or_empty(ENTITY, self.store.read_all().await)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Appointment, ServiceError> {
        self.store
            .read(id)
            .await
            .map_err(|e| ServiceError::from_read(ENTITY, e))
    }

    pub async fn get_by_dni(&self, dni: i64) -> Result<Appointment, ServiceError> {
        self.store
            .read_by_dni(dni)
            .await
            .map_err(|e| ServiceError::from_read(ENTITY, e))
    }

    /// Inserts the appointment and returns it with its assigned id. The nested
    /// records are returned as given.
    pub async fn create(&self, mut appointment: Appointment) -> Result<Appointment, ServiceError> {
        appointment.id = self
            .store
            .create(&appointment)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, "id", "creating", e))?;
        Ok(appointment)
    }

    pub async fn update(
        &self,
        id: i64,
        mut appointment: Appointment,
    ) -> Result<Appointment, ServiceError> {
        appointment.id = id;
        self.store
            .update(&appointment)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, "id", "updating", e))?;
        Ok(appointment)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, "id", "deleting", e))
    }

    pub async fn patient_by_id(&self, id: i64) -> Result<Patient, ServiceError> {
        self.store
            .patient_by_id(id)
            .await
            .map_err(|e| ServiceError::from_read("patient", e))
    }

    pub async fn patient_by_dni(&self, dni: i64) -> Result<Patient, ServiceError> {
        self.store
            .patient_by_dni(dni)
            .await
            .map_err(|e| ServiceError::from_read("patient", e))
    }

    pub async fn dentist_by_id(&self, id: i64) -> Result<Dentist, ServiceError> {
        self.store
            .dentist_by_id(id)
            .await
            .map_err(|e| ServiceError::from_read("dentist", e))
    }

    pub async fn dentist_by_license(&self, license: &str) -> Result<Dentist, ServiceError> {
        self.store
            .dentist_by_license(license)
            .await
            .map_err(|e| ServiceError::from_read("dentist", e))
    }
}
