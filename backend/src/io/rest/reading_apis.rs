//! # REST API for Blood-Sugar Readings
//!
//! Endpoints for readings nested under their owning patient.

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
use super::mappers::ReadingMapper;
use crate::AppState;
use shared::BloodSugarReadingDto;

/// Record a reading for a patient
pub async fn create_reading(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    request: Result<Json<BloodSugarReadingDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(patient_id) = path?;
    let Json(request) = request?;
    info!("POST /api/patients/{}/readings", patient_id);
    debug!("POST /api/patients/{}/readings - request: {:?}", patient_id, request);

    let reading = state.reading_service.create_reading(patient_id, request).await?;
    Ok((StatusCode::CREATED, Json(ReadingMapper::to_dto(reading))))
}

/// List the readings of a patient
pub async fn list_readings(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(patient_id) = path?;
    info!("GET /api/patients/{}/readings", patient_id);

    let readings = state.reading_service.list_readings(patient_id).await?;
    Ok(Json(ReadingMapper::to_dto_list(readings)))
}

pub async fn get_reading(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((patient_id, reading_id)) = path?;
    info!("GET /api/patients/{}/readings/{}", patient_id, reading_id);

    let reading = state.reading_service.get_reading(patient_id, reading_id).await?;
    Ok(Json(ReadingMapper::to_dto(reading)))
}

/// Update timestamp, level and unit of a reading
pub async fn update_reading(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    request: Result<Json<BloodSugarReadingDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((patient_id, reading_id)) = path?;
    let Json(request) = request?;
    info!("PUT /api/patients/{}/readings/{}", patient_id, reading_id);
    debug!(
        "PUT /api/patients/{}/readings/{} - request: {:?}",
        patient_id, reading_id, request
    );

    let reading = state
        .reading_service
        .update_reading(patient_id, reading_id, request)
        .await?;
    Ok(Json(ReadingMapper::to_dto(reading)))
}

pub async fn delete_reading(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((patient_id, reading_id)) = path?;
    info!("DELETE /api/patients/{}/readings/{}", patient_id, reading_id);

    state.reading_service.delete_reading(patient_id, reading_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
