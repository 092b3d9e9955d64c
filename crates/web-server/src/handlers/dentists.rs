use super::{body, id};
use crate::{error::AppError, AppState};
use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use core_types::Dentist;
use std::sync::Arc;

/// # GET /dentists
#[utoipa::path(
    get,
    path = "/dentists",
    operation_id = "list_dentists",
    tag = "dentists",
    responses(
        (status = 200, description = "Every dentist; empty when the store fails", body = [Dentist])
    )
)]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Dentist>>, AppError> {
    Ok(Json(state.services.dentists.get_all().await?))
}

/// # GET /dentists/:id
#[utoipa::path(
    get,
    path = "/dentists/{id}",
    operation_id = "get_dentist",
    tag = "dentists",
    params(("id" = i64, Path, description = "Dentist id")),
    responses(
        (status = 200, description = "The dentist", body = Dentist),
        (status = 400, description = "The id is not a number"),
        (status = 404, description = "No dentist with that id")
    )
)]
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Dentist>, AppError> {
    Ok(Json(state.services.dentists.get_by_id(id(path)?).await?))
}

/// # POST /dentists
#[utoipa::path(
    post,
    path = "/dentists",
    operation_id = "create_dentist",
    tag = "dentists",
    params(("TOKEN" = String, Header, description = "Write token")),
    request_body = Dentist,
    responses(
        (status = 201, description = "Dentist created", body = Dentist),
        (status = 400, description = "Unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 409, description = "That license already exists")
    )
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Dentist>, JsonRejection>,
) -> Result<(StatusCode, Json<Dentist>), AppError> {
    let dentist = body(payload)?;
    dentist.validate_complete()?;
    let created = state.services.dentists.create(dentist).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// # PUT /dentists/:id
#[utoipa::path(
    put,
    path = "/dentists/{id}",
    operation_id = "replace_dentist",
    tag = "dentists",
    params(
        ("id" = i64, Path, description = "Dentist id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Dentist,
    responses(
        (status = 200, description = "Dentist replaced", body = Dentist),
        (status = 400, description = "Bad id, unreadable body or a missing field"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No dentist with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn replace(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Dentist>, JsonRejection>,
) -> Result<Json<Dentist>, AppError> {
    let id = id(path)?;
    state.services.dentists.get_by_id(id).await?;
    let dentist = body(payload)?;
    dentist.validate_complete()?;
    Ok(Json(state.services.dentists.update(id, dentist).await?))
}

/// # PATCH /dentists/:id
#[utoipa::path(
    patch,
    path = "/dentists/{id}",
    operation_id = "patch_dentist",
    tag = "dentists",
    params(
        ("id" = i64, Path, description = "Dentist id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    request_body = Dentist,
    responses(
        (status = 200, description = "Supplied fields updated", body = Dentist),
        (status = 400, description = "Bad id or unreadable body"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No dentist with that id"),
        (status = 409, description = "The update failed")
    )
)]
pub async fn patch(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Dentist>, JsonRejection>,
) -> Result<Json<Dentist>, AppError> {
    let id = id(path)?;
    state.services.dentists.get_by_id(id).await?;
    Ok(Json(state.services.dentists.update(id, body(payload)?).await?))
}

/// # DELETE /dentists/:id
#[utoipa::path(
    delete,
    path = "/dentists/{id}",
    operation_id = "delete_dentist",
    tag = "dentists",
    params(
        ("id" = i64, Path, description = "Dentist id"),
        ("TOKEN" = String, Header, description = "Write token")
    ),
    responses(
        (status = 204, description = "Dentist deleted"),
        (status = 400, description = "The id is not a number"),
        (status = 401, description = "Missing or wrong token"),
        (status = 404, description = "No dentist with that id"),
        (status = 409, description = "The dentist still has appointments")
    )
)]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    state.services.dentists.delete(id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
