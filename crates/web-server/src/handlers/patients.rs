use super::{body, dni, id};
use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use core_types::Patient;
use std::sync::Arc;

/// # GET /patients
#[utoipa::path(
    get,
    path = "/patients",
    operation_id = "list_patients",
    tag = "patients",
    responses(
        (status = 200, description = "Every patient; empty when the store fails", body = [Patient])
    )
)]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Patient>>, AppError> {
    Ok(Json(state.services.patients.get_all().await?))
}

/// # GET /patients/:id
#[utoipa::path(
    get,
    path = "/patients/{id}",
    operation_id = "get_patient",
    tag = "patients",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 400, description = "The id is not a number"),
        (status = 404, description = "No patient with that id")
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Patient>, AppError> {
    let patient = state.services.patients.get_by_id(id(path)?).await?;
    Ok(Json(patient))
}

/// # GET /patients/dni/:dni
#[utoipa::path(
    get,
    path = "/patients/dni/{dni}",
    operation_id = "get_patient_by_dni",
    tag = "patients",
    params(("dni" = i64, Path, description = "National identity document number")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 400, description = "The dni is not a number"),
        (status = 404, description = "No patient with that dni")
    )
)]
pub async fn get_by_dni(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Patient>, AppError> {
    let patient = state.services.patients.get_by_dni(dni(path)?).await?;
    Ok(Json(patient))
}

/// # POST /patients
#[utoipa::path(
    post,
    path = "/patients",
    operation_id = "create_patient",
    tag = "patients",
    params(("TOKEN" = String, Header, description = "Write token")),
    request_body = Patient,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 409, description = "That dni already exists")
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = body(payload)?;
    patient.validate_complete()?;
    let created = state.services.patients.create(patient).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # PUT /patients/:id
/// Replaces every field; all of them must be supplied.
#[utoipa::path(
    put,
    path = "/patients/{id}",
    operation_id = "replace_patient",
    tag = "patients",
    params(
        ("id" = i64, Path, description = "Patient id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Patient,
    responses(
        (status = 200, description = "Patient replaced", body = Patient),
        (status = 400, description = "Bad id, unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No patient with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<Json<Patient>, AppError> {
    let id = id(path)?;
    state.services.patients.get_by_id(id).await?;
    let patient = body(payload)?;
    patient.validate_complete()?;
    Ok(Json(state.services.patients.update(id, patient).await?))
}

/// # PATCH /patients/:id
#[utoipa::path(
    patch,
    path = "/patients/{id}",
    operation_id = "patch_patient",
    tag = "patients",
    params(
        ("id" = i64, Path, description = "Patient id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Patient,
    responses(
        (status = 200, description = "Supplied fields updated", body = Patient),
        (status = 400, description = "Bad id or unreadable body"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No patient with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Patient>, JsonRejection>,
) -> Result<Json<Patient>, AppError> {
    let id = id(path)?;
    state.services.patients.get_by_id(id).await?;
    let partial = body(payload)?;
    Ok(Json(state.services.patients.update(id, partial).await?))
}

/// # DELETE /patients/:id
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    operation_id = "delete_patient",
    tag = "patients",
    params(
        ("id" = i64, Path, description = "Patient id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 400, description = "The id is not a number"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No patient with that id"),
        (status = 409, description = "The patient still has appointments")
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.services.patients.delete(id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
