use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use log::{error, info};
use serde::Deserialize;

use super::{
    error::{api_error, ApiError},
    measurements::{parse_id, query_params},
};
use crate::{
    color::{CalibrationGains, ColorOutputs, ColorProcessor, NamedPalette, PaletteEntry, ProcessedColor},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct ColorParams {
    /// Comma-separated subset of `hsl`, `lab`, `name`; all when absent.
    pub include: Option<String>,
}

pub(super) fn processor_for(state: &AppState, params: &ColorParams) -> Result<ColorProcessor, ApiError> {
    let outputs = params
        .include
        .as_deref()
        .map(ColorOutputs::parse)
        .transpose()?
        .unwrap_or_default();
    Ok(ColorProcessor::new(state.settings.calibration(), outputs))
}

pub async fn measurement_color(
    State(state): State<AppState>,
    Path(id): Path<String>,
    params: Result<Query<ColorParams>, QueryRejection>,
) -> Result<Json<ProcessedColor>, ApiError> {
    let id = parse_id(&id)?;
    let processor = processor_for(&state, &query_params(params)?)?;
    let color = state
        .query
        .color(id, &processor)
        .await
        .map_err(api_error("Failed to fetch measurement"))?;
    Ok(Json(color))
}

pub async fn get_calibration(State(state): State<AppState>) -> Json<CalibrationGains> {
    Json(state.settings.calibration())
}

pub async fn put_calibration(
    State(state): State<AppState>,
    payload: Result<Json<CalibrationGains>, JsonRejection>,
) -> Result<Json<CalibrationGains>, ApiError> {
    let Json(gains) = payload.map_err(|rejection| {
        ApiError::bad_request(format!("Invalid calibration body: {}", rejection.body_text()))
    })?;
    gains.validate()?;

    state.settings.update_calibration(gains).map_err(|err| {
        error!("Failed to persist calibration: {err:#}");
        ApiError::new(
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save calibration",
        )
    })?;
    info!(
        "Calibration gains updated to ({}, {}, {})",
        gains.red, gains.green, gains.blue
    );

    Ok(Json(gains))
}

pub async fn palette() -> Json<Vec<PaletteEntry>> {
    Json(NamedPalette::default().describe())
}
