use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use log::error;
use serde::Serialize;
use uuid::Uuid;

use super::{
    colors::{processor_for, ColorParams},
    error::{api_error, ApiError},
    measurements::{json_body, query_params},
};
use crate::{
    error::ServiceError,
    measurements::{MeasurementInput, ProcessedReading},
    AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub window_capacity: usize,
}

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::from(ServiceError::session_not_found(raw)))
}

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            window_capacity: state.sessions.window_capacity(),
        }),
    )
}

const CREATE_FAILED: &str = "Failed to create measurement";

/// Store a reading and return it with the session's smoothed descriptor.
///
/// Storing and pushing into the window run on their own task, so a client
/// that disconnects mid-request cannot leave a stored reading outside the
/// session window.
pub async fn ingest_for_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    params: Result<Query<ColorParams>, QueryRejection>,
    payload: Result<Json<MeasurementInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProcessedReading>), ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let window = state.sessions.window(session_id).await?;
    let processor = processor_for(&state, &query_params(params)?)?;
    let input = json_body(payload)?;

    let ingestion = state.ingestion.clone();
    let task = tokio::spawn(async move {
        let mut window = window.lock_owned().await;
        ingestion
            .ingest_and_process(&input, &mut window, &processor)
            .await
    });

    let reading = match task.await {
        Ok(result) => result.map_err(api_error(CREATE_FAILED))?,
        Err(join_err) => {
            error!("Session ingest task failed: {join_err}");
            return Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED));
        }
    };

    Ok((StatusCode::CREATED, Json(reading)))
}

pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    state.sessions.reset(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
