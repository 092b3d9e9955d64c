//! The OpenAPI document served next to the Swagger UI.

use crate::handlers::{appointments, dentists, patients};
use core_types::{Appointment, Dentist, Patient};
use utoipa::OpenApi;

/// Where the Swagger UI is mounted.
pub const DOCS_PATH: &str = "/docs";
/// Where the raw OpenAPI JSON is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        patients::list,
        patients::get_by_id,
        patients::get_by_dni,
        patients::create,
        patients::replace,
        patients::patch,
        patients::delete,
        dentists::list,
        dentists::get_by_id,
        dentists::create,
        dentists::replace,
        dentists::patch,
        dentists::delete,
        appointments::list,
        appointments::get_by_id,
        appointments::get_by_dni,
        appointments::create,
        appointments::book,
        appointments::replace,
        appointments::patch,
        appointments::delete,
    ),
    components(schemas(Patient, Dentist, Appointment, appointments::BookingRequest)),
    tags(
        (name = "patients", description = "Patient records"),
        (name = "dentists", description = "Dentist records"),
        (name = "appointments", description = "Appointments between a patient and a dentist")
    )
)]
pub struct ApiDoc;
