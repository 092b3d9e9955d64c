use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use configuration::{
    AuthSettings, DatabaseSettings, RepositorySettings, ServerSettings, UpdateKeyCheck,
};
use database::MemoryStore;
use http_body_util::BodyExt; // for `collect`
use serde_json::{json, Value};
use tower::ServiceExt;

const TOKEN: &str = "secret";

fn settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: [127, 0, 0, 1].into(),
            port: 0,
        },
        database: DatabaseSettings {
            url: String::new(),
            max_connections: 1,
            acquire_timeout_secs: 1,
        },
        auth: AuthSettings {
            token: TOKEN.to_string(),
        },
        repository: RepositorySettings::default(),
    }
}

fn test_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let services = Services::new(store.clone(), UpdateKeyCheck::RequireExisting);
    (store, app(services, Arc::new(settings())))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("TOKEN", TOKEN);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn patient_json(dni: i64) -> Value {
    json!({
        "name": "Ana",
        "lastname": "Gomez",
        "residence": "Calle 1",
        "dni": dni,
        "discharge_date": "2024-01-01"
    })
}

fn dentist_json(license: &str) -> Value {
    json!({ "lastname": "Paz", "name": "Eva", "license": license })
}

async fn seed(app: &Router) -> (Value, Value) {
    let patient = send(app, request("POST", "/patients", Some(patient_json(42)))).await;
    assert_eq!(patient.status(), StatusCode::CREATED);
    let dentist = send(app, request("POST", "/dentists", Some(dentist_json("LIC-1")))).await;
    assert_eq!(dentist.status(), StatusCode::CREATED);
    (json_body(patient).await, json_body(dentist).await)
}

#[tokio::test]
async fn health_check() {
    let (_, app) = test_app();
    let response = send(&app, request("GET", "/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn writes_without_token_are_unauthorized() {
    let (_, app) = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/patients")
            .header("content-type", "application/json")
            .body(Body::from(patient_json(42).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "token not found");
}

#[tokio::test]
async fn writes_with_wrong_token_are_unauthorized() {
    let (_, app) = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/dentists/1")
            .header("TOKEN", "nope")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "token not valid");
}

#[tokio::test]
async fn reads_need_no_token() {
    let (_, app) = test_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/patients")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn create_then_fetch_patient() {
    let (_, app) = test_app();
    let (patient, _) = seed(&app).await;
    let id = patient["id"].as_i64().unwrap();

    let response = send(&app, request("GET", &format!("/patients/{id}"), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, patient);

    let response = send(&app, request("GET", "/patients/dni/42", None)).await;
    assert_eq!(json_body(response).await["id"], id);
}

#[tokio::test]
async fn create_with_missing_field_is_bad_request() {
    let (_, app) = test_app();
    let response = send(
        &app,
        request("POST", "/dentists", Some(json!({ "lastname": "Paz", "name": "Eva" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "license was empty");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (_, app) = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/patients")
            .header("TOKEN", TOKEN)
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid json");
}

#[tokio::test]
async fn duplicate_license_is_conflict() {
    let (_, app) = test_app();
    seed(&app).await;
    let response = send(&app, request("POST", "/dentists", Some(dentist_json("LIC-1")))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn patch_merges_supplied_fields() {
    let (_, app) = test_app();
    let (patient, _) = seed(&app).await;
    let id = patient["id"].as_i64().unwrap();

    let response = send(
        &app,
        request("PATCH", &format!("/patients/{id}"), Some(json!({ "residence": "Calle 9" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["residence"], "Calle 9");
    assert_eq!(updated["name"], "Ana");
    assert_eq!(updated["dni"], 42);
}

#[tokio::test]
async fn put_requires_every_field() {
    let (_, app) = test_app();
    let (_, dentist) = seed(&app).await;
    let id = dentist["id"].as_i64().unwrap();

    let response = send(
        &app,
        request("PUT", &format!("/dentists/{id}"), Some(json!({ "name": "Leo" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let (_, app) = test_app();
    let response = send(
        &app,
        request("PATCH", "/patients/99", Some(json!({ "name": "Luz" }))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "patient not found");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (_, app) = test_app();
    let response = send(&app, request("GET", "/dentists/abc", None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "invalid id");
}

#[tokio::test]
async fn booking_by_dni_and_license() {
    let (_, app) = test_app();
    let (patient, dentist) = seed(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/appointments/42/LIC-1",
            Some(json!({ "date": "2024-01-10", "time": "09:00", "description": "cleaning" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booked = json_body(response).await;
    assert_eq!(booked["patient"], patient);
    assert_eq!(booked["dentist"], dentist);
    assert_eq!(booked["date"], "2024-01-10");
    assert_eq!(booked["time"], "09:00");
    assert_eq!(booked["description"], "cleaning");

    let response = send(&app, request("GET", "/appointments/dni/42", None)).await;
    assert_eq!(json_body(response).await["id"], booked["id"]);
}

#[tokio::test]
async fn booking_with_unknown_license_creates_nothing() {
    let (_, app) = test_app();
    seed(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/appointments/42/LIC-404",
            Some(json!({ "date": "2024-01-10", "time": "09:00", "description": "cleaning" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request("GET", "/appointments", None)).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn create_appointment_from_nested_ids() {
    let (_, app) = test_app();
    let (patient, dentist) = seed(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/appointments",
            Some(json!({
                "patient": { "id": patient["id"] },
                "dentist": { "id": dentist["id"] },
                "date": "2024-02-01",
                "time": "11:00",
                "description": "checkup"
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["patient"]["dni"], 42);
    assert_eq!(created["dentist"]["license"], "LIC-1");
}

#[tokio::test]
async fn delete_then_delete_again() {
    let (_, app) = test_app();
    let (patient, _) = seed(&app).await;
    let uri = format!("/patients/{}", patient["id"]);

    let response = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = send(&app, request("DELETE", &uri, None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_a_broken_store_is_an_empty_list() {
    let (store, app) = test_app();
    seed(&app).await;
    store.set_unavailable(true);

    for uri in ["/patients", "/dentists", "/appointments"] {
        let response = send(&app, request("GET", uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }
}

#[tokio::test]
async fn booking_with_missing_field_is_bad_request() {
    let (_, app) = test_app();
    seed(&app).await;

    let response = send(
        &app,
        request(
            "POST",
            "/appointments/42/LIC-1",
            Some(json!({ "date": "2024-05-02", "time": "10:30" })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "description was empty");

    let response = send(&app, request("GET", "/appointments", None)).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let (_, app) = test_app();
    let response = send(&app, request("GET", docs::OPENAPI_PATH, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await;
    let paths = &doc["paths"];
    assert!(paths["/appointments/{dni}/{license}"]["post"].is_object());
    assert!(paths["/patients/{id}"]["patch"].is_object());
    assert!(paths["/patients/dni/{dni}"]["get"].is_object());
    assert!(paths["/dentists"]["post"].is_object());
    assert!(doc["components"]["schemas"]["BookingRequest"].is_object());
}

#[tokio::test]
async fn swagger_ui_is_served() {
    let (_, app) = test_app();
    let response = send(&app, request("GET", "/docs/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}
