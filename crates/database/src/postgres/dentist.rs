use super::{expect_affected, PgStore};
use crate::{store::DentistStore, DbError};
use async_trait::async_trait;
use core_types::Dentist;
use sqlx::FromRow;

/// A row of the `dentists` table.
#[derive(Debug, FromRow)]
struct DentistRow {
    id: i64,
    lastname: String,
    name: String,
    license: String,
}

impl From<DentistRow> for Dentist {
    fn from(row: DentistRow) -> Self {
        Dentist {
            id: row.id,
            lastname: row.lastname,
            name: row.name,
            license: row.license,
        }
    }
}

const SELECT_DENTIST: &str = "SELECT id, lastname, name, license FROM dentists";

#[async_trait]
impl DentistStore for PgStore {
    async fn read(&self, id: i64) -> Result<Dentist, DbError> {
        let row = sqlx::query_as::<_, DentistRow>(&format!("{SELECT_DENTIST} WHERE id = $1"))
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_by_license(&self, license: &str) -> Result<Dentist, DbError> {
        let row =
            sqlx::query_as::<_, DentistRow>(&format!("{SELECT_DENTIST} WHERE license = $1"))
                .bind(license)
                .fetch_one(&self.pool)
                .await
                .map_err(DbError::from_read)?;
        Ok(row.into())
    }

    async fn read_all(&self) -> Result<Vec<Dentist>, DbError> {
        let rows = sqlx::query_as::<_, DentistRow>(&format!("{SELECT_DENTIST} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Dentist::from).collect())
    }

    async fn create(&self, dentist: &Dentist) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO dentists (lastname, name, license) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&dentist.lastname)
        .bind(&dentist.name)
        .bind(&dentist.license)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        Ok(id)
    }

    async fn update(&self, dentist: &Dentist) -> Result<(), DbError> {
        let result = sqlx::query(
            "UPDATE dentists SET lastname = $1, name = $2, license = $3 WHERE id = $4",
        )
        .bind(&dentist.lastname)
        .bind(&dentist.name)
        .bind(&dentist.license)
        .bind(dentist.id)
        .execute(&self.pool)
        .await
        .map_err(DbError::from_write)?;
        expect_affected(result)
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM dentists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::from_write)?;
        expect_affected(result)
    }

    async fn exists(&self, license: &str) -> Result<bool, DbError> {
        let found = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM dentists WHERE license = $1)",
        )
        .bind(license)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }
}
