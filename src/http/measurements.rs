use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::warn;
use serde::Deserialize;

use super::error::{api_error, ApiError};
use crate::{
    db::RawMeasurement,
    error::ServiceError,
    measurements::{input::MISSING_FIELDS_MESSAGE, MeasurementInput},
    AppState,
};

const FETCH_FAILED: &str = "Failed to fetch measurements";
const FETCH_ONE_FAILED: &str = "Failed to fetch measurement";
const CREATE_FAILED: &str = "Failed to create measurement";

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Identifiers that do not parse cannot exist in the store.
pub(super) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::from(ServiceError::measurement_not_found(raw)))
}

/// Unparseable bodies are treated like missing fields, as are falsy
/// channels such as `0`.
pub(super) fn json_body(
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> Result<MeasurementInput, ApiError> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!("Rejected measurement body: {rejection}");
            return Err(ApiError::bad_request(MISSING_FIELDS_MESSAGE));
        }
    };
    input.validate_request()?;
    Ok(input)
}

pub(super) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::bad_request(format!("Invalid query: {}", rejection.body_text())))
}

pub async fn list_measurements(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<RawMeasurement>>, ApiError> {
    let params = query_params(params)?;
    let measurements = match (params.limit, params.offset) {
        (None, None) => state.query.history().await,
        (limit, offset) => {
            state
                .query
                .page(limit.unwrap_or(u32::MAX), offset.unwrap_or(0))
                .await
        }
    }
    .map_err(api_error(FETCH_FAILED))?;

    Ok(Json(measurements))
}

pub async fn latest_measurement(State(state): State<AppState>) -> Result<Response, ApiError> {
    let latest = state.query.latest().await.map_err(api_error(FETCH_ONE_FAILED))?;
    Ok(match latest {
        Some(measurement) => Json(measurement).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn get_measurement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RawMeasurement>, ApiError> {
    let id = parse_id(&id)?;
    let measurement = state.query.one(id).await.map_err(api_error(FETCH_ONE_FAILED))?;
    Ok(Json(measurement))
}

pub async fn create_measurement(
    State(state): State<AppState>,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> Result<(StatusCode, Json<RawMeasurement>), ApiError> {
    let input = json_body(payload)?;
    let created = state
        .ingestion
        .ingest(&input)
        .await
        .map_err(api_error(CREATE_FAILED))?;
    Ok((StatusCode::CREATED, Json(created)))
}
