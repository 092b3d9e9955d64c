use super::repository::AppointmentRepository;
use crate::error::ServiceError;
use core_types::{Appointment, Merge};

#[derive(Clone)]
pub struct AppointmentService {
    repository: AppointmentRepository,
}

impl AppointmentService {
    pub fn new(repository: AppointmentRepository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Appointment>, ServiceError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Appointment, ServiceError> {
        self.repository.get_by_id(id).await
    }

    pub async fn get_by_dni(&self, dni: i64) -> Result<Appointment, ServiceError> {
        self.repository.get_by_dni(dni).await
    }

    /// Creates an appointment for the patient and dentist named by id in
    /// `appointment`. Both must exist; the stored records are embedded in the
    /// result.
    pub async fn create(&self, mut appointment: Appointment) -> Result<Appointment, ServiceError> {
        appointment.patient = self.repository.patient_by_id(appointment.patient.id).await?;
        appointment.dentist = self.repository.dentist_by_id(appointment.dentist.id).await?;
        let appointment = self.repository.create(appointment).await?;
        tracing::info!(id = appointment.id, "Appointment created.");
        Ok(appointment)
    }

    /// Books an appointment for the patient holding `dni` with the dentist
    /// holding `license`.
    ///
    /// Both lookups run before the insert, so a failed lookup leaves storage
    /// untouched. The lookups and the insert are not wrapped in a transaction.
    pub async fn create_by_dni_and_license(
        &self,
        dni: i64,
        license: &str,
        date: String,
        time: String,
        description: String,
    ) -> Result<Appointment, ServiceError> {
        let patient = self.repository.patient_by_dni(dni).await?;
        let dentist = self.repository.dentist_by_license(license).await?;

        let appointment = self
            .repository
            .create(Appointment {
                id: 0,
                patient,
                dentist,
                date,
                time,
                description,
            })
            .await?;
        tracing::info!(id = appointment.id, dni, license, "Appointment booked.");
        Ok(appointment)
    }

    /// Merges the supplied fields of `partial` into the stored appointment.
    /// A nested patient or dentist with a non-zero id relinks the appointment
    /// to that record, which must exist.
    pub async fn update(&self, id: i64, mut partial: Appointment) -> Result<Appointment, ServiceError> {
        let mut stored = self.repository.get_by_id(id).await?;
        if partial.patient.id != 0 {
            partial.patient = self.repository.patient_by_id(partial.patient.id).await?;
        }
        if partial.dentist.id != 0 {
            partial.dentist = self.repository.dentist_by_id(partial.dentist.id).await?;
        }
        stored.merge(partial);
        self.repository.update(id, stored).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete(id).await?;
        tracing::info!(id, "Appointment deleted.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{Dentist, Patient};
    use database::{AppointmentStore, DentistStore, MemoryStore, PatientStore};
    use std::sync::Arc;

    struct Fixture {
        store: Arc<MemoryStore>,
        service: AppointmentService,
        patient: Patient,
        dentist: Dentist,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let mut patient = Patient {
            name: "Ana".to_string(),
            lastname: "Gomez".to_string(),
            residence: "Calle 1".to_string(),
            dni: 42,
            discharge_date: "2024-01-01".to_string(),
            ..Default::default()
        };
        patient.id = PatientStore::create(store.as_ref(), &patient).await.unwrap();
        let mut dentist = Dentist {
            lastname: "Paz".to_string(),
            name: "Eva".to_string(),
            license: "LIC-1".to_string(),
            ..Default::default()
        };
        dentist.id = DentistStore::create(store.as_ref(), &dentist).await.unwrap();

        let service = AppointmentService::new(AppointmentRepository::new(store.clone()));
        Fixture { store, service, patient, dentist }
    }

    async fn book(fx: &Fixture) -> Appointment {
        fx.service
            .create_by_dni_and_license(
                42,
                "LIC-1",
                "2024-01-10".to_string(),
                "09:00".to_string(),
                "cleaning".to_string(),
            )
            .await
            .unwrap()
    }

    async fn appointment_count(store: &MemoryStore) -> usize {
        AppointmentStore::read_all(store).await.unwrap().len()
    }

    #[tokio::test]
    async fn booking_embeds_resolved_records() {
        let fx = fixture().await;
        let booked = book(&fx).await;

        assert_ne!(booked.id, 0);
        assert_eq!(booked.patient, fx.patient);
        assert_eq!(booked.dentist, fx.dentist);
        assert_eq!(booked.date, "2024-01-10");
        assert_eq!(booked.time, "09:00");
        assert_eq!(booked.description, "cleaning");
        assert_eq!(fx.service.get_by_id(booked.id).await.unwrap(), booked);
    }

    #[tokio::test]
    async fn booking_with_unknown_dni_writes_nothing() {
        let fx = fixture().await;
        let err = fx
            .service
            .create_by_dni_and_license(
                7,
                "LIC-1",
                "2024-01-10".to_string(),
                "09:00".to_string(),
                "cleaning".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "patient not found"));
        assert_eq!(appointment_count(&fx.store).await, 0);
    }

    #[tokio::test]
    async fn booking_with_unknown_license_writes_nothing() {
        let fx = fixture().await;
        let err = fx
            .service
            .create_by_dni_and_license(
                42,
                "LIC-404",
                "2024-01-10".to_string(),
                "09:00".to_string(),
                "cleaning".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "dentist not found"));
        assert_eq!(appointment_count(&fx.store).await, 0);
    }

    #[tokio::test]
    async fn create_resolves_records_by_id() {
        let fx = fixture().await;
        let created = fx
            .service
            .create(Appointment {
                patient: Patient { id: fx.patient.id, ..Default::default() },
                dentist: Dentist { id: fx.dentist.id, ..Default::default() },
                date: "2024-02-01".to_string(),
                time: "11:00".to_string(),
                description: "checkup".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.patient, fx.patient);
        assert_eq!(created.dentist, fx.dentist);

        let err = fx
            .service
            .create(Appointment {
                patient: Patient { id: 99, ..Default::default() },
                dentist: Dentist { id: fx.dentist.id, ..Default::default() },
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(appointment_count(&fx.store).await, 1);
    }

    #[tokio::test]
    async fn update_merges_schedule_and_relinks_dentist() {
        let fx = fixture().await;
        let booked = book(&fx).await;
        let mut other = Dentist {
            lastname: "Ruiz".to_string(),
            name: "Leo".to_string(),
            license: "LIC-2".to_string(),
            ..Default::default()
        };
        other.id = DentistStore::create(fx.store.as_ref(), &other).await.unwrap();

        let updated = fx
            .service
            .update(
                booked.id,
                Appointment {
                    dentist: Dentist { id: other.id, ..Default::default() },
                    time: "10:30".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.dentist, other);
        assert_eq!(updated.patient, fx.patient);
        assert_eq!(updated.time, "10:30");
        assert_eq!(updated.date, "2024-01-10");
        assert_eq!(updated.description, "cleaning");
        assert_eq!(fx.service.get_by_id(booked.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn get_by_dni_finds_the_patients_appointment() {
        let fx = fixture().await;
        let booked = book(&fx).await;
        assert_eq!(fx.service.get_by_dni(42).await.unwrap().id, booked.id);
        assert!(matches!(
            fx.service.get_by_dni(1).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn listing_a_broken_store_is_empty() {
        let fx = fixture().await;
        book(&fx).await;
        fx.store.set_unavailable(true);
        assert!(fx.service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_store_unchanged() {
        let fx = fixture().await;
        book(&fx).await;
        assert!(matches!(fx.service.delete(99).await, Err(ServiceError::NotFound(_))));
        assert_eq!(appointment_count(&fx.store).await, 1);
    }
}
