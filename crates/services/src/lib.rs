//! # Clinic Services Crate
//!
//! The business layer of the clinic backend. Each entity has a repository,
//! which rewraps storage failures into [`ServiceError`] kinds and enforces
//! unique business keys, and a service, which applies the merge-patch update
//! rule. The appointment service also owns the booking workflow that resolves
//! a patient by DNI and a dentist by license before inserting.

pub mod appointment;
pub mod dentist;
pub mod error;
pub mod patient;
pub mod policy;

pub use appointment::{AppointmentRepository, AppointmentService};
pub use dentist::{DentistRepository, DentistService};
pub use error::ServiceError;
pub use patient::{PatientRepository, PatientService};
pub use policy::LIST_FAILURES_ARE_EMPTY;

use configuration::UpdateKeyCheck;
use database::{AppointmentStore, DentistStore, PatientStore};
use std::sync::Arc;

/// The three entity services, built over one backing store.
#[derive(Clone)]
pub struct Services {
    pub patients: PatientService,
    pub dentists: DentistService,
    pub appointments: AppointmentService,
}

impl Services {
    pub fn new<S>(store: Arc<S>, key_check: UpdateKeyCheck) -> Self
    where
        S: PatientStore + DentistStore + AppointmentStore + 'static,
    {
        let patient_store: Arc<dyn PatientStore> = store.clone();
        let dentist_store: Arc<dyn DentistStore> = store.clone();
        let appointment_store: Arc<dyn AppointmentStore> = store;

        Self {
            patients: PatientService::new(PatientRepository::new(patient_store, key_check)),
            dentists: DentistService::new(DentistRepository::new(dentist_store, key_check)),
            appointments: AppointmentService::new(AppointmentRepository::new(appointment_store)),
        }
    }
}
