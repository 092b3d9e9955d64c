use super::repository::PatientRepository;
use crate::error::ServiceError;
use core_types::{Merge, Patient};

#[derive(Clone)]
pub struct PatientService {
    repository: PatientRepository,
}

impl PatientService {
    pub fn new(repository: PatientRepository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Patient>, ServiceError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Patient, ServiceError> {
        self.repository.get_by_id(id).await
    }

    pub async fn get_by_dni(&self, dni: i64) -> Result<Patient, ServiceError> {
        self.repository.get_by_dni(dni).await
    }

    pub async fn create(&self, patient: Patient) -> Result<Patient, ServiceError> {
        let patient = self.repository.create(patient).await?;
        tracing::info!(id = patient.id, dni = patient.dni, "Patient created.");
        Ok(patient)
    }

    /// Merges the supplied fields of `partial` into the stored patient.
    pub async fn update(&self, id: i64, partial: Patient) -> Result<Patient, ServiceError> {
        let mut stored = self.repository.get_by_id(id).await?;
        stored.merge(partial);
        self.repository.update(id, stored).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete(id).await?;
        tracing::info!(id, "Patient deleted.");
        Ok(())
    }
}
