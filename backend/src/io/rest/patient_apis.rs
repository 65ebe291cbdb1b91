//! # REST API for Patient Management
//!
//! Endpoints for creating, retrieving, updating, and deleting patients.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{debug, info};

use super::error::ApiError;
use super::mappers::PatientMapper;
use crate::AppState;
use shared::PatientDto;

/// Create a new patient
pub async fn create_patient(
    State(state): State<AppState>,
    request: Result<Json<PatientDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request?;
    info!("POST /api/patients");
    debug!("POST /api/patients - request: {:?}", request);

    let patient = state.patient_service.create_patient(request).await?;
    Ok((StatusCode::CREATED, Json(PatientMapper::to_dto(patient))))
}

/// List all patients with their readings
pub async fn list_patients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/patients");

    let patients = state.patient_service.list_patients().await?;
    Ok(Json(PatientMapper::to_dto_list(patients)))
}

/// Get a patient by ID
pub async fn get_patient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(patient_id) = path?;
    info!("GET /api/patients/{}", patient_id);

    let patient = state.patient_service.get_patient(patient_id).await?;
    Ok(Json(PatientMapper::to_dto(patient)))
}

/// Update a patient's name and date of birth
pub async fn update_patient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    request: Result<Json<PatientDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(patient_id) = path?;
    let Json(request) = request?;
    info!("PUT /api/patients/{}", patient_id);
    debug!("PUT /api/patients/{} - request: {:?}", patient_id, request);

    let patient = state.patient_service.update_patient(patient_id, request).await?;
    Ok(Json(PatientMapper::to_dto(patient)))
}

/// Delete a patient and all of its readings
pub async fn delete_patient(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(patient_id) = path?;
    info!("DELETE /api/patients/{}", patient_id);

    state.patient_service.delete_patient(patient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
