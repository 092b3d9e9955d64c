//! An in-process implementation of every store trait.
//!
//! It mirrors the PostgreSQL schema closely enough to stand in for it: ids are
//! assigned sequentially per table, `dni` and `license` are unique, and rows
//! referenced by an appointment cannot be deleted.

use crate::error::DbError;
use crate::store::{AppointmentStore, DentistStore, PatientStore};
use async_trait::async_trait;
use core_types::{Appointment, Dentist, Patient};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// An appointment as stored: foreign keys plus the schedule fields.
#[derive(Debug, Clone)]
struct AppointmentRecord {
    patient_id: i64,
    dentist_id: i64,
    date: String,
    time: String,
    description: String,
}

#[derive(Debug, Default)]
struct Tables {
    patients: BTreeMap<i64, Patient>,
    dentists: BTreeMap<i64, Dentist>,
    appointments: BTreeMap<i64, AppointmentRecord>,
    last_patient_id: i64,
    last_dentist_id: i64,
    last_appointment_id: i64,
}

impl Tables {
    /// Inner join of an appointment with the rows it references.
    fn join(&self, id: i64, record: &AppointmentRecord) -> Option<Appointment> {
        Some(Appointment {
            id,
            patient: self.patients.get(&record.patient_id)?.clone(),
            dentist: self.dentists.get(&record.dentist_id)?.clone(),
            date: record.date.clone(),
            time: record.time.clone(),
            description: record.description.clone(),
        })
    }

    fn check_references(&self, appointment: &Appointment) -> Result<(), DbError> {
        if !self.patients.contains_key(&appointment.patient.id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "patient {} does not exist",
                appointment.patient.id
            )));
        }
        if !self.dentists.contains_key(&appointment.dentist.id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "dentist {} does not exist",
                appointment.dentist.id
            )));
        }
        Ok(())
    }

    fn dni_taken(&self, dni: i64, except: i64) -> bool {
        self.patients.values().any(|p| p.dni == dni && p.id != except)
    }

    fn license_taken(&self, license: &str, except: i64) -> bool {
        self.dentists
            .values()
            .any(|d| d.license == license && d.id != except)
    }
}

fn record_of(appointment: &Appointment) -> AppointmentRecord {
    AppointmentRecord {
        patient_id: appointment.patient.id,
        dentist_id: appointment.dentist.id,
        date: appointment.date.clone(),
        time: appointment.time.clone(),
        description: appointment.description.clone(),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`DbError::Unavailable`], as a store
    /// whose backing database has gone away would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DbError::Unavailable("memory store switched off".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PatientStore for MemoryStore {
    async fn read(&self, id: i64) -> Result<Patient, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables.patients.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn read_by_dni(&self, dni: i64) -> Result<Patient, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables
            .patients
            .values()
            .find(|p| p.dni == dni)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn read_all(&self) -> Result<Vec<Patient>, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.patients.values().cloned().collect())
    }

    async fn create(&self, patient: &Patient) -> Result<i64, DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.dni_taken(patient.dni, 0) {
            return Err(DbError::UniqueViolation(format!("dni {}", patient.dni)));
        }
        tables.last_patient_id += 1;
        let id = tables.last_patient_id;
        tables.patients.insert(id, Patient { id, ..patient.clone() });
        Ok(id)
    }

    async fn update(&self, patient: &Patient) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.patients.contains_key(&patient.id) {
            return Err(DbError::NotFound);
        }
        if tables.dni_taken(patient.dni, patient.id) {
            return Err(DbError::UniqueViolation(format!("dni {}", patient.dni)));
        }
        tables.patients.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.appointments.values().any(|a| a.patient_id == id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "patient {id} is referenced by an appointment"
            )));
        }
        tables.patients.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }

    async fn exists(&self, dni: i64) -> Result<bool, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.patients.values().any(|p| p.dni == dni))
    }
}

#[async_trait]
impl DentistStore for MemoryStore {
    async fn read(&self, id: i64) -> Result<Dentist, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables.dentists.get(&id).cloned().ok_or(DbError::NotFound)
    }

    async fn read_by_license(&self, license: &str) -> Result<Dentist, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables
            .dentists
            .values()
            .find(|d| d.license == license)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn read_all(&self) -> Result<Vec<Dentist>, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.dentists.values().cloned().collect())
    }

    async fn create(&self, dentist: &Dentist) -> Result<i64, DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.license_taken(&dentist.license, 0) {
            return Err(DbError::UniqueViolation(format!("license {}", dentist.license)));
        }
        tables.last_dentist_id += 1;
        let id = tables.last_dentist_id;
        tables.dentists.insert(id, Dentist { id, ..dentist.clone() });
        Ok(id)
    }

    async fn update(&self, dentist: &Dentist) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.dentists.contains_key(&dentist.id) {
            return Err(DbError::NotFound);
        }
        if tables.license_taken(&dentist.license, dentist.id) {
            return Err(DbError::UniqueViolation(format!("license {}", dentist.license)));
        }
        tables.dentists.insert(dentist.id, dentist.clone());
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.appointments.values().any(|a| a.dentist_id == id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "dentist {id} is referenced by an appointment"
            )));
        }
        tables.dentists.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }

    async fn exists(&self, license: &str) -> Result<bool, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.dentists.values().any(|d| d.license == license))
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn read(&self, id: i64) -> Result<Appointment, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables
            .appointments
            .get(&id)
            .and_then(|record| tables.join(id, record))
            .ok_or(DbError::NotFound)
    }

    async fn read_by_dni(&self, dni: i64) -> Result<Appointment, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        tables
            .appointments
            .iter()
            .filter_map(|(id, record)| tables.join(*id, record))
            .find(|a| a.patient.dni == dni)
            .ok_or(DbError::NotFound)
    }

    async fn read_all(&self) -> Result<Vec<Appointment>, DbError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .appointments
            .iter()
            .filter_map(|(id, record)| tables.join(*id, record))
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<i64, DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.check_references(appointment)?;
        tables.last_appointment_id += 1;
        let id = tables.last_appointment_id;
        tables.appointments.insert(id, record_of(appointment));
        Ok(id)
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains_key(&appointment.id) {
            return Err(DbError::NotFound);
        }
        tables.check_references(appointment)?;
        tables.appointments.insert(appointment.id, record_of(appointment));
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        tables.appointments.remove(&id).map(|_| ()).ok_or(DbError::NotFound)
    }

    async fn patient_by_id(&self, id: i64) -> Result<Patient, DbError> {
        PatientStore::read(self, id).await
    }

    async fn patient_by_dni(&self, dni: i64) -> Result<Patient, DbError> {
        PatientStore::read_by_dni(self, dni).await
    }

    async fn dentist_by_id(&self, id: i64) -> Result<Dentist, DbError> {
        DentistStore::read(self, id).await
    }

    async fn dentist_by_license(&self, license: &str) -> Result<Dentist, DbError> {
        DentistStore::read_by_license(self, license).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(dni: i64) -> Patient {
        Patient {
            name: "Ana".to_string(),
            lastname: "Gomez".to_string(),
            residence: "Calle 1".to_string(),
            dni,
            discharge_date: "2024-01-01".to_string(),
            ..Default::default()
        }
    }

    fn dentist(license: &str) -> Dentist {
        Dentist {
            lastname: "Paz".to_string(),
            name: "Eva".to_string(),
            license: license.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_per_table() {
        let store = MemoryStore::new();
        assert_eq!(PatientStore::create(&store, &patient(1)).await.unwrap(), 1);
        assert_eq!(PatientStore::create(&store, &patient(2)).await.unwrap(), 2);
        assert_eq!(DentistStore::create(&store, &dentist("LIC-1")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_dni_is_a_unique_violation() {
        let store = MemoryStore::new();
        PatientStore::create(&store, &patient(42)).await.unwrap();
        let err = PatientStore::create(&store, &patient(42)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn appointment_reads_join_current_rows() {
        let store = MemoryStore::new();
        let patient_id = PatientStore::create(&store, &patient(42)).await.unwrap();
        let dentist_id = DentistStore::create(&store, &dentist("LIC-1")).await.unwrap();
        let appointment = Appointment {
            patient: Patient { id: patient_id, ..Default::default() },
            dentist: Dentist { id: dentist_id, ..Default::default() },
            date: "2024-01-10".to_string(),
            time: "09:00".to_string(),
            description: "cleaning".to_string(),
            ..Default::default()
        };
        let id = AppointmentStore::create(&store, &appointment).await.unwrap();

        let read = AppointmentStore::read(&store, id).await.unwrap();
        assert_eq!(read.patient.dni, 42);
        assert_eq!(read.dentist.license, "LIC-1");
        assert_eq!(AppointmentStore::read_by_dni(&store, 42).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn referenced_patient_cannot_be_deleted() {
        let store = MemoryStore::new();
        let patient_id = PatientStore::create(&store, &patient(42)).await.unwrap();
        let dentist_id = DentistStore::create(&store, &dentist("LIC-1")).await.unwrap();
        let appointment = Appointment {
            patient: Patient { id: patient_id, ..Default::default() },
            dentist: Dentist { id: dentist_id, ..Default::default() },
            ..Default::default()
        };
        AppointmentStore::create(&store, &appointment).await.unwrap();

        let err = PatientStore::delete(&store, patient_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            PatientStore::delete(&store, 9).await,
            Err(DbError::NotFound)
        ));
        assert!(matches!(
            DentistStore::update(&store, &dentist("LIC-9")).await,
            Err(DbError::NotFound)
        ));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            PatientStore::read_all(&store).await,
            Err(DbError::Unavailable(_))
        ));
        store.set_unavailable(false);
        assert!(PatientStore::read_all(&store).await.unwrap().is_empty());
    }
}
