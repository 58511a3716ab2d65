//! REST surface consumed by the display layer. The display layer polls; the
//! service never pushes.

pub mod colors;
pub mod error;
pub mod measurements;
pub mod sessions;

use axum::{
    http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use error::ApiError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/measurements",
            get(measurements::list_measurements).post(measurements::create_measurement),
        )
        .route("/api/measurements/latest", get(measurements::latest_measurement))
        .route("/api/measurements/:id", get(measurements::get_measurement))
        .route("/api/measurements/:id/color", get(colors::measurement_color))
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/:session_id",
            axum::routing::delete(sessions::delete_session),
        )
        .route(
            "/api/sessions/:session_id/measurements",
            post(sessions::ingest_for_session),
        )
        .route("/api/sessions/:session_id/reset", post(sessions::reset_session))
        .route(
            "/api/calibration",
            get(colors::get_calibration).put(colors::put_calibration),
        )
        .route("/api/palette", get(colors::palette))
        .route("/healthz", get(|| async { "ok" }))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}
