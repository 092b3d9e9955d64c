//! Merge-patch semantics shared by every entity.
//!
//! A field of the partial value overwrites the stored field only when it is
//! non-empty (strings) or non-zero (integers). A caller therefore cannot clear
//! a field through an update: an empty value reads as "not supplied".

use crate::structs::{Appointment, Dentist, Patient};

pub trait Merge {
    /// Overwrites `self` with every supplied field of `partial`.
    fn merge(&mut self, partial: Self);
}

fn merge_text(stored: &mut String, incoming: String) {
    if !incoming.is_empty() {
        *stored = incoming;
    }
}

fn merge_number(stored: &mut i64, incoming: i64) {
    if incoming != 0 {
        *stored = incoming;
    }
}

impl Merge for Patient {
    fn merge(&mut self, partial: Self) {
        merge_text(&mut self.name, partial.name);
        merge_text(&mut self.lastname, partial.lastname);
        merge_text(&mut self.residence, partial.residence);
        merge_number(&mut self.dni, partial.dni);
        merge_text(&mut self.discharge_date, partial.discharge_date);
    }
}

impl Merge for Dentist {
    fn merge(&mut self, partial: Self) {
        merge_text(&mut self.lastname, partial.lastname);
        merge_text(&mut self.name, partial.name);
        merge_text(&mut self.license, partial.license);
    }
}

impl Merge for Appointment {
    /// Nested records are replaced whole when the partial names a different
    /// id. The caller is expected to have resolved them from storage first.
    fn merge(&mut self, partial: Self) {
        if partial.patient.id != 0 {
            self.patient = partial.patient;
        }
        if partial.dentist.id != 0 {
            self.dentist = partial.dentist;
        }
        merge_text(&mut self.date, partial.date);
        merge_text(&mut self.time, partial.time);
        merge_text(&mut self.description, partial.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_patient() -> Patient {
        Patient {
            id: 1,
            name: "Ana".to_string(),
            lastname: "Gomez".to_string(),
            residence: "Calle 1".to_string(),
            dni: 42,
            discharge_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn empty_fields_keep_stored_values() {
        let mut patient = stored_patient();
        patient.merge(Patient::default());
        assert_eq!(patient, stored_patient());
    }

    #[test]
    fn supplied_fields_overwrite_stored_values() {
        let mut patient = stored_patient();
        patient.merge(Patient {
            residence: "Calle 2".to_string(),
            dni: 43,
            ..Default::default()
        });
        assert_eq!(patient.residence, "Calle 2");
        assert_eq!(patient.dni, 43);
        assert_eq!(patient.name, "Ana");
        assert_eq!(patient.id, 1);
    }

    #[test]
    fn partial_id_is_never_merged() {
        let mut dentist = Dentist {
            id: 5,
            lastname: "Paz".to_string(),
            name: "Eva".to_string(),
            license: "LIC-1".to_string(),
        };
        dentist.merge(Dentist { id: 99, name: "Eve".to_string(), ..Default::default() });
        assert_eq!(dentist.id, 5);
        assert_eq!(dentist.name, "Eve");
        assert_eq!(dentist.license, "LIC-1");
    }

    #[test]
    fn appointment_relinks_only_supplied_records() {
        let mut appointment = Appointment {
            id: 3,
            patient: stored_patient(),
            dentist: Dentist { id: 5, ..Default::default() },
            date: "2024-01-10".to_string(),
            time: "09:00".to_string(),
            description: "cleaning".to_string(),
        };
        appointment.merge(Appointment {
            dentist: Dentist { id: 6, license: "LIC-2".to_string(), ..Default::default() },
            time: "10:30".to_string(),
            ..Default::default()
        });
        assert_eq!(appointment.patient, stored_patient());
        assert_eq!(appointment.dentist.id, 6);
        assert_eq!(appointment.time, "10:30");
        assert_eq!(appointment.date, "2024-01-10");
    }
}
