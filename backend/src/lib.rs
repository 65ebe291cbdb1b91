//! # Glucose Tracker Backend
//!
//! REST backend for patients and their blood-sugar readings.
//!
//! - **config**: layered settings (defaults, `glucose-tracker.toml`, environment)
//! - **domain**: entities, validation and the patient/reading services
//! - **storage**: SQLite persistence behind the `Connection` trait
//! - **io**: axum handlers, DTO mappers and the error envelope
//!
//! The binary in `main.rs` only wires these together.

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use crate::config::{DatabaseSettings, ServerSettings};
use crate::domain::{PatientService, ReadingService};
use crate::io::rest::error::{method_not_allowed, route_not_found};
use crate::storage::DbConnection;

/// Services shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService<DbConnection>,
    pub reading_service: ReadingService<DbConnection>,
}

impl AppState {
    pub fn new(db: Arc<DbConnection>) -> Self {
        Self {
            patient_service: PatientService::new(db.clone()),
            reading_service: ReadingService::new(db),
        }
    }
}

/// Open the database, prepare the schema and build the services
pub async fn initialize_backend(settings: &DatabaseSettings) -> Result<AppState> {
    info!("Initializing backend services");
    let db = DbConnection::init(settings).await?;
    Ok(AppState::new(Arc::new(db)))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Build the full application router
pub fn create_router(state: AppState, server: &ServerSettings) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(server.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route(
            "/patients",
            get(io::list_patients)
                .post(io::create_patient)
                .fallback(method_not_allowed),
        )
        .route(
            "/patients/:patient_id",
            get(io::get_patient)
                .put(io::update_patient)
                .delete(io::delete_patient)
                .fallback(method_not_allowed),
        )
        .route(
            "/patients/:patient_id/readings",
            get(io::list_readings)
                .post(io::create_reading)
                .fallback(method_not_allowed),
        )
        .route(
            "/patients/:patient_id/readings/:reading_id",
            get(io::get_reading)
                .put(io::update_reading)
                .delete(io::delete_reading)
                .fallback(method_not_allowed),
        );

    Ok(Router::new()
        .nest("/api", api_routes)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
