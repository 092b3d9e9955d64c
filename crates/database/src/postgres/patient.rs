use super::{expect_affected, PgStore};
use crate::{store::PatientStore, DbError};
use async_trait::async_trait;
use core_types::Patient;
use sqlx::FromRow;

/// A row of the `patients` table.
#[derive(Debug, FromRow)]
struct PatientRow {
    id: i64,
    name: String,
    lastname: String,
    residence: String,
    dni: i64,
    discharge_date: String,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            name: row.name,
            lastname: row.lastname,
            residence: row.residence,
            dni: row.dni,
            discharge_date: row.discharge_date,
        }
    }
}

const SELECT_PATIENT: &str =
    "SELECT id, name, lastname, residence, dni, discharge_date FROM patients";

#[async_trait]
impl PatientStore for PgStore {
    async fn read(&self, id: i64) -> Result<Patient, DbError> {
        let row = sqlx::query_as::<_, PatientRow>(&format!("{SELECT_PATIENT} WHERE id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_by_dni(&self, dni: i64) -> Result<Patient, DbError> {
        let row = sqlx::query_as::<_, PatientRow>(&format!("{SELECT_PATIENT} WHERE dni = $1"))
            .bind(dni)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_all(&self) -> Result<Vec<Patient>, DbError> {
        let rows = sqlx::query_as::<_, PatientRow>(&format!("{SELECT_PATIENT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Patient::from).collect())
    }

    async fn create(&self, patient: &Patient) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO patients (name, lastname, residence, dni, discharge_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&patient.name)
        .bind(&patient.lastname)
        .bind(&patient.residence)
        .bind(patient.dni)
        .bind(&patient.discharge_date)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        Ok(id)
    }

    async fn update(&self, patient: &Patient) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE patients
            SET name = $1, lastname = $2, residence = $3, dni = $4, discharge_date = $5
            WHERE id = $6
            "#,
        )
        .bind(&patient.name)
        .bind(&patient.lastname)
        .bind(&patient.residence)
        .bind(patient.dni)
        .bind(&patient.discharge_date)
        .bind(patient.id)
        .execute(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        expect_affected(result)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_write)?;
        expect_affected(result)
    }

    async fn exists(&self, dni: i64) -> Result<bool, DbError> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM patients WHERE dni = $1)",
        )
        .bind(dni)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}
