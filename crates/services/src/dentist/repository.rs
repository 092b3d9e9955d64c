use super::{ENTITY, KEY};
use crate::{error::ServiceError, policy};
use configuration::UpdateKeyCheck;
use core_types::Dentist;
use database::{DbError, DentistStore};
use std::sync::Arc;

/// Wraps the dentist store: rewraps its failures and guards the unique license.
#[derive(Clone)]
pub struct DentistRepository {
    store: Arc<dyn DentistStore>,
    key_check: UpdateKeyCheck,
}

impl DentistRepository {
    pub fn new(store: Arc<dyn DentistStore>, key_check: UpdateKeyCheck) -> Self {
        Self { store, key_check }
    }

    pub async fn get_all(&self) -> Result<Vec<Dentist>, ServiceError> {
        policy::list_or_empty(ENTITY, self.store.read_all().await)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Dentist, ServiceError> {
        self.store
            .read(id)
            .await
            .map_err(|e| ServiceError::from_read(ENTITY, e))
    }

    pub async fn create(&self, mut dentist: Dentist) -> Result<Dentist, ServiceError> {
        if self.license_exists(&dentist.license).await? {
            return Err(ServiceError::DuplicateKey(format!("that {KEY} already exists")));
        }
        dentist.id = self
            .store
            .create(&dentist)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "creating", e))?;
        Ok(dentist)
    }

    pub async fn update(&self, id: i64, mut dentist: Dentist) -> Result<Dentist, ServiceError> {
        dentist.id = id;
        match self.key_check {
            UpdateKeyCheck::RequireExisting => {
                if !self.license_exists(&dentist.license).await? {
                    return Err(ServiceError::Conflict {
                        message: format!("{KEY} {} is not registered", dentist.license),
                        source: None,
                    });
                }
            }
            UpdateKeyCheck::RejectDuplicate => {
                match self.store.read_by_license(&dentist.license).await {
                    Ok(holder) if holder.id != id => {
                        return Err(ServiceError::DuplicateKey(format!(
                            "that {KEY} already exists"
                        )));
                    }
                    Ok(_) | Err(DbError::NotFound) => {}
                    Err(e) => return Err(ServiceError::from_write(ENTITY, KEY, "updating", e)),
                }
            }
        }
        self.store
            .update(&dentist)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "updating", e))?;
        Ok(dentist)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| ServiceError::from_write(ENTITY, KEY, "deleting", e))
    }

    async fn license_exists(&self, license: &str) -> Result<bool, ServiceError> {
        self.store
            .exists(license)
            .await
            .map_err(|e| ServiceError::conflict(format!("could not check {KEY} {license}"), e))
    }
}
