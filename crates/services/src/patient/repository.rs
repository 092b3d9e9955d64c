use super::{ENTITY, KEY};
use crate::{error::ServiceError, policy};
use configuration::UpdateKeyCheck;
use core_types::Patient;
use database::{DbError, PatientStore};
use std::sync::Arc;

/// Wraps the patient store: rewraps its failures and guards the unique DNI.
#[derive(Clone)]
pub struct PatientRepository {
    store: Arc<dyn PatientStore>,
    key_check: UpdateKeyCheck,
}

impl PatientRepository {
    pub fn new(store: Arc<dyn PatientStore>, key_check: UpdateKeyCheck) -> Self {
        Self { store, key_check }
    }

    pub async fn get_all(&self) -> Result<Vec<Patient>, ServiceError> {
        policy::list_or_empty(ENTITY, self.store.read_all().await)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Patient, ServiceError> {
        self.store
            .read(id)
            .await
            .map_err(|e| ServiceError::from_read(ENTITY, e))
    }

    pub async fn get_by_dni(&self, dni: i64) -> Result<Patient, ServiceError> {
        self.store
            .read_by_dni(dni)
            .await
            .map_err(|e| ServiceError::from_read(ENTITY, e))
    }

    /// Inserts the patient unless its DNI is already registered.
    ///
    /// The existence check and the insert are separate statements; the unique
    /// index on `dni` catches a concurrent insert that slips between them.
    pub async fn create(&self, mut patient: Patient) -> Result<Patient, ServiceError> {
        if self.dni_exists(patient.dni).await? {
            return Err(ServiceError::DuplicateKey(format!("that {KEY} already exists")));
        }
        patient.id = self
            .store
            .create(&patient)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "creating", e))?;
        Ok(patient)
    }

    /// Persists the already merged `patient` under `id`.
    pub async fn update(&self, id: i64, mut patient: Patient) -> Result<Patient, ServiceError> {
        patient.id = id;
        match self.key_check {
            UpdateKeyCheck::RequireExisting => {
                if !self.dni_exists(patient.dni).await? {
                    return Err(ServiceError::Conflict {
                        message: format!("{KEY} {} is not registered", patient.dni),
                        source: None,
                    });
                }
            }
            UpdateKeyCheck::RejectDuplicate => match self.store.read_by_dni(patient.dni).await {
                Ok(holder) if holder.id != id => {
                    return Err(ServiceError::DuplicateKey(format!("that {KEY} already exists")));
                }
                Ok(_) | Err(DbError::NotFound) => {}
                Err(e) => return Err(ServiceError::from_write(ENTITY, KEY, "updating", e)),
            },
        }
        self.store
            .update(&patient)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "updating", e))?;
        Ok(patient)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "deleting", e))
    }

    async fn dni_exists(&self, dni: i64) -> Result<bool, ServiceError> {
        self.store
            .exists(dni)
            .await
            .map_err(|e| ServiceError::conflict(format!("could not check {KEY} {dni}"), e))
    }
}
