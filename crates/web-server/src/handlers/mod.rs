//! HTTP handlers, one module per entity.

pub mod appointments;
pub mod dentists;
pub mod patients;

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path},
    Json,
};

/// Unwraps a JSON body, answering 400 for anything unreadable.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|_| AppError::BadRequest("invalid json"))
}

/// Unwraps a numeric path id, answering 400 when it does not parse.
fn id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("invalid id"))
}

fn dni(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(dni)| dni)
        .map_err(|_| AppError::BadRequest("invalid dni"))
}
