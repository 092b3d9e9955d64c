use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use configuration::Settings;
use services::Services;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod docs;
pub mod error;
pub mod handlers;

#[cfg(test)]
mod tests;

use handlers::{appointments, dentists, patients};

/// The shared application state that all handlers can access.
pub struct AppState {
    pub services: Services,
    pub settings: Arc<Settings>,
}

/// Builds the full application router over `services`.
pub fn app(services: Services, settings: Arc<Settings>) -> Router {
    let state = Arc::new(AppState { services, settings });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/patients", patient_routes(&state))
        .nest("/dentists", dentist_routes(&state))
        .nest("/appointments", appointment_routes(&state))
        .with_state(state)
        .merge(SwaggerUi::new(docs::DOCS_PATH).url(docs::OPENAPI_PATH, docs::ApiDoc::openapi()))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Routes that modify data sit behind the token check; reads are open.
fn protected(state: &Arc<AppState>, routes: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::require_token,
    ))
}

fn patient_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let writes = Router::new()
        .route("/", post(patients::create))
        .route(
            "/:id",
            put(patients::replace)
                .patch(patients::patch)
                .delete(patients::delete),
        );

    Router::new()
        .route("/", get(patients::list))
        .route("/:id", get(patients::get_by_id))
        .route("/dni/:dni", get(patients::get_by_dni))
        .merge(protected(state, writes))
}

fn dentist_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let writes = Router::new()
        .route("/", post(dentists::create))
        .route(
            "/:id",
            put(dentists::replace)
                .patch(dentists::patch)
                .delete(dentists::delete),
        );

    Router::new()
        .route("/", get(dentists::list))
        .route("/:id", get(dentists::get_by_id))
        .merge(protected(state, writes))
}

fn appointment_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    // `/:id/:license` books by patient DNI; the segment shares the `id`
    // name with the sibling route because the router requires it.
    let writes = Router::new()
        .route("/", post(appointments::create))
        .route("/:id/:license", post(appointments::book))
        .route(
            "/:id",
            put(appointments::replace)
                .patch(appointments::patch)
                .delete(appointments::delete),
        );

    Router::new()
        .route("/", get(appointments::list))
        .route("/:id", get(appointments::get_by_id))
        .route("/dni/:dni", get(appointments::get_by_dni))
        .merge(protected(state, writes))
}

/// Serves `services` on the configured address until the process stops.
pub async fn run_server(settings: Settings, services: Services) -> anyhow::Result<()> {
    let addr = settings.server.addr();
    let app = app(services, Arc::new(settings));

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
