use super::repository::DentistRepository;
use crate::error::ServiceError;
use core_types::{Dentist, Merge};

#[derive(Clone)]
pub struct DentistService {
    repository: DentistRepository,
}

impl DentistService {
    pub fn new(repository: DentistRepository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Dentist>, ServiceError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Dentist, ServiceError> {
        self.repository.get_by_id(id).await
    }

    pub async fn create(&self, dentist: Dentist) -> Result<Dentist, ServiceError> {
        let dentist = self.repository.create(dentist).await?;
        tracing::info!(id = dentist.id, license = %dentist.license, "Dentist created.");
        Ok(dentist)
    }

    pub async fn update(&self, id: i64, partial: Dentist) -> Result<Dentist, ServiceError> {
        let mut stored = self.repository.get_by_id(id).await?;
        stored.merge(partial);
        self.repository.update(id, stored).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete(id).await?;
        tracing::info!(id, "Dentist deleted.");
        Ok(())
    }
}
