use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A clinic patient. `dni` is the national identity document number and is
/// unique across all patients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    pub residence: String,
    pub dni: i64,
    /// Kept as free text, the way clients send it.
    pub discharge_date: String,
}

/// A dentist, identified for business purposes by a unique license number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Dentist {
    pub id: i64,
    pub lastname: String,
    pub name: String,
    pub license: String,
}

/// An appointment joining a patient and a dentist.
///
/// The nested records are copies taken when the appointment was read, not
/// live references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Appointment {
    pub id: i64,
    pub patient: Patient,
    pub dentist: Dentist,
    pub date: String,
    pub time: String,
    pub description: String,
}

impl Patient {
    /// Checks that every business field carries a value.
    pub fn validate_complete(&self) -> Result<(), CoreError> {
        match self {
            p if p.name.is_empty() => Err(CoreError::MissingField("name")),
            p if p.lastname.is_empty() => Err(CoreError::MissingField("lastname")),
            p if p.residence.is_empty() => Err(CoreError::MissingField("residence")),
            p if p.dni == 0 => Err(CoreError::MissingField("dni")),
            p if p.discharge_date.is_empty() => Err(CoreError::MissingField("discharge_date")),
            _ => Ok(()),
        }
    }
}

impl Dentist {
    /// Checks that every business field carries a value.
    pub fn validate_complete(&self) -> Result<(), CoreError> {
        match self {
            d if d.lastname.is_empty() => Err(CoreError::MissingField("lastname")),
            d if d.name.is_empty() => Err(CoreError::MissingField("name")),
            d if d.license.is_empty() => Err(CoreError::MissingField("license")),
            _ => Ok(()),
        }
    }
}

impl Appointment {
    /// Checks that the appointment names a patient and a dentist and that the
    /// schedule fields carry values. The nested records only need an id here;
    /// the service resolves the rest from storage.
    pub fn validate_complete(&self) -> Result<(), CoreError> {
        match self {
            a if a.patient.id == 0 => Err(CoreError::MissingField("patient")),
            a if a.dentist.id == 0 => Err(CoreError::MissingField("dentist")),
            a if a.date.is_empty() => Err(CoreError::MissingField("date")),
            a if a.time.is_empty() => Err(CoreError::MissingField("time")),
            a if a.description.is_empty() => Err(CoreError::MissingField("description")),
            _ => Ok(()),
        }
    }
}
