use super::{expect_affected, PgStore};
use crate::store::{AppointmentStore, DentistStore, PatientStore};
use crate::DbError;
use async_trait::async_trait;
use core_types::{Appointment, Dentist, Patient};
use sqlx::FromRow;

/// The result of joining `appointments` with `patients` and `dentists`.
#[derive(Debug, FromRow)]
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    patient_name: String,
    patient_lastname: String,
    patient_residence: String,
    patient_dni: i64,
    patient_discharge_date: String,
    dentist_id: i64,
    dentist_lastname: String,
    dentist_name: String,
    dentist_license: String,
    date: String,
    time: String,
    description: String,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            patient: Patient {
                id: row.patient_id,
                name: row.patient_name,
                lastname: row.patient_lastname,
                residence: row.patient_residence,
                dni: row.patient_dni,
                discharge_date: row.patient_discharge_date,
            },
            dentist: Dentist {
                id: row.dentist_id,
                lastname: row.dentist_lastname,
                name: row.dentist_name,
                license: row.dentist_license,
            },
            date: row.date,
            time: row.time,
            description: row.description,
        }
    }
}

const SELECT_APPOINTMENT: &str = r#"
    SELECT
        a.id, a.patient_id,
        p.name AS patient_name, p.lastname AS patient_lastname,
        p.residence AS patient_residence, p.dni AS patient_dni,
        p.discharge_date AS patient_discharge_date,
        a.dentist_id,
        d.lastname AS dentist_lastname, d.name AS dentist_name,
        d.license AS dentist_license,
        a.date, a.time, a.description
    FROM
        appointments AS a
    JOIN
        patients AS p ON a.patient_id = p.id
    JOIN
        dentists AS d ON a.dentist_id = d.id
"#;

#[async_trait]
impl AppointmentStore for PgStore {
    async fn read(&self, id: i64) -> Result<Appointment, DbError> {
        let row =
            sqlx::query_as::<_, AppointmentRow>(&format!("{SELECT_APPOINTMENT} WHERE a.id = $1"))
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_by_dni(&self, dni: i64) -> Result<Appointment, DbError> {
        let row = sqlx::query_as::<_, AppointmentRow>(&format!(
            "{SELECT_APPOINTMENT} WHERE p.dni = $1 ORDER BY a.id LIMIT 1"
        ))
        .bind(dni)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_all(&self) -> Result<Vec<Appointment>, DbError> {
        let rows =
            sqlx::query_as::<_, AppointmentRow>(&format!("{SELECT_APPOINTMENT} ORDER BY a.id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO appointments (patient_id, dentist_id, date, time, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(appointment.patient.id)
        .bind(appointment.dentist.id)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.description)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        Ok(id)
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET patient_id = $1, dentist_id = $2, date = $3, time = $4, description = $5
            WHERE id = $6
            "#,
        )
        .bind(appointment.patient.id)
        .bind(appointment.dentist.id)
        .bind(&appointment.date)
        .bind(&appointment.time)
        .bind(&appointment.description)
        .bind(appointment.id)
        .execute(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        expect_affected(result)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_write)?;
        expect_affected(result)
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
