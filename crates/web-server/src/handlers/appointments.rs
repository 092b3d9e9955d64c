use super::{body, dni, id};
use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use core_types::{Appointment, CoreError};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// The body of a booking request; patient and dentist come from the path.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub description: String,
}

impl BookingRequest {
    fn validate_complete(&self) -> Result<(), CoreError> {
        match self {
            r if r.date.is_empty() => Err(CoreError::MissingField("date")),
            r if r.time.is_empty() => Err(CoreError::MissingField("time")),
            r if r.description.is_empty() => Err(CoreError::MissingField("description")),
            _ => Ok(()),
        }
    }
}

/// # GET /appointments
#[utoipa::path(
    get,
    path = "/appointments",
    operation_id = "list_appointments",
    tag = "appointments",
    responses(
        (status = 200, description = "Every appointment; empty when the store fails", body = [Appointment])
    )
)]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    Ok(Json(state.services.appointments.get_all().await?))
}

/// # GET /appointments/:id
#[utoipa::path(
    get,
    path = "/appointments/{id}",
    operation_id = "get_appointment",
    tag = "appointments",
    params(("id" = i64, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 400, description = "The id is not a number"),
        (status = 404, description = "No appointment with that id")
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.services.appointments.get_by_id(id(path)?).await?))
}

/// # GET /appointments/dni/:dni
#[utoipa::path(
    get,
    path = "/appointments/dni/{dni}",
    operation_id = "get_appointment_by_dni",
    tag = "appointments",
    params(("dni" = i64, Path, description = "Patient's national identity document number")),
    responses(
        (status = 200, description = "An appointment of that patient", body = Appointment),
        (status = 400, description = "The dni is not a number"),
        (status = 404, description = "No appointment for that dni")
    )
)]
pub async fn get_by_dni(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Appointment>, AppError> {
    Ok(Json(state.services.appointments.get_by_dni(dni(path)?).await?))
}

/// # POST /appointments
/// The nested patient and dentist only need their ids.
#[utoipa::path(
    post,
    path = "/appointments",
    operation_id = "create_appointment",
    tag = "appointments",
    params(("TOKEN" = String, Header, description = "Write token")),
    request_body = Appointment,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "The patient or dentist does not exist")
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = body(payload)?;
    appointment.validate_complete()?;
    let created = state.services.appointments.create(appointment).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # POST /appointments/:dni/:license
#[utoipa::path(
    post,
    path = "/appointments/{dni}/{license}",
    operation_id = "book_appointment",
    tag = "appointments",
    params(
        ("dni" = i64, Path, description = "Patient's national identity document number"),
        ("license" = String, Path, description = "Dentist's license"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Bad dni, unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No patient with that dni or no dentist with that license")
    )
)]
pub async fn book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, String)>, PathRejection>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let Path((dni, license)) = path.map_err(|_| AppError::BadRequest("invalid dni"))?;
    let request = body(payload)?;
    request.validate_complete()?;

    let booked = state
        .services
        .appointments
        .create_by_dni_and_license(dni, &license, request.date, request.time, request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(booked)))
}

/// # PUT /appointments/:id
#[utoipa::path(
    put,
    path = "/appointments/{id}",
    operation_id = "replace_appointment",
    tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Appointment,
    responses(
        (status = 200, description = "Appointment replaced", body = Appointment),
        (status = 400, description = "Bad id, unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No appointment with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let id = id(path)?;
    state.services.appointments.get_by_id(id).await?;
    let appointment = body(payload)?;
    appointment.validate_complete()?;
    Ok(Json(state.services.appointments.update(id, appointment).await?))
}

/// # PATCH /appointments/:id
#[utoipa::path(
    patch,
    path = "/appointments/{id}",
    operation_id = "patch_appointment",
    tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Appointment,
    responses(
        (status = 200, description = "Supplied fields updated", body = Appointment),
        (status = 400, description = "Bad id or unreadable body"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No appointment with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Appointment>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let id = id(path)?;
    state.services.appointments.get_by_id(id).await?;
    Ok(Json(state.services.appointments.update(id, body(payload)?).await?))
}

/// # DELETE /appointments/:id
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    operation_id = "delete_appointment",
    tag = "appointments",
    params(
        ("id" = i64, Path, description = "Appointment id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 400, description = "The id is not a number"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No appointment with that id")
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.services.appointments.delete(id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
