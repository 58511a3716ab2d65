//! Drives the full route table, middleware included, in process.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use colorsense::{config::AppConfig, db::Database, http::router, settings::SettingsStore, AppState};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

struct Reply {
    status: StatusCode,
    allow_origin: Option<String>,
    body: Vec<u8>,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }
}

fn app() -> Router {
    let settings_path = std::env::temp_dir().join(format!("colorsense-http-{}.json", Uuid::new_v4()));
    router(AppState::new(
        Database::in_memory().unwrap(),
        SettingsStore::new(settings_path).unwrap(),
        &AppConfig::default(),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |raw| Body::from(raw.to_owned())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    Reply {
        status,
        allow_origin,
        body,
    }
}

#[tokio::test]
async fn measurement_endpoints() {
    let app = app();

    let empty = send(&app, Method::GET, "/api/measurements", None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json(), Value::Array(Vec::new()));
    assert_eq!(empty.allow_origin.as_deref(), Some("*"));

    assert_eq!(
        send(&app, Method::GET, "/api/measurements/latest", None).await.status,
        StatusCode::NO_CONTENT
    );

    let created = send(
        &app,
        Method::POST,
        "/api/measurements",
        Some(r#"{"red":1,"green":2,"blue":3}"#),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created = created.json();
    assert!(created["createdAt"].is_string());

    let listed = send(&app, Method::GET, "/api/measurements", None).await.json();
    assert_eq!(listed[0], created);

    let id = created["id"].as_i64().unwrap();
    let one = send(&app, Method::GET, &format!("/api/measurements/{id}"), None).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.json(), created);

    let latest = send(&app, Method::GET, "/api/measurements/latest", None).await;
    assert_eq!(latest.json(), created);

    let missing = send(&app, Method::GET, "/api/measurements/12345", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.json()["message"], "Measurement not found");

    let malformed = send(&app, Method::POST, "/api/measurements", Some("{red")).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn falsy_channels_are_rejected() {
    let app = app();

    for body in [
        r#"{"red":0,"green":null,"blue":5}"#,
        r#"{"red":0,"green":5,"blue":5}"#,
        r#"{"red":5,"blue":5}"#,
    ] {
        let reply = send(&app, Method::POST, "/api/measurements", Some(body)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(reply.json()["message"], "All color values are required");
    }

    let listed = send(&app, Method::GET, "/api/measurements", None).await.json();
    assert_eq!(listed, Value::Array(Vec::new()));
}

#[tokio::test]
async fn bad_query_strings_get_json_errors() {
    let app = app();

    let reply = send(&app, Method::GET, "/api/measurements?limit=-1", None).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.json()["message"].is_string());

    let page = send(&app, Method::GET, "/api/measurements?limit=2&offset=0", None).await;
    assert_eq!(page.status, StatusCode::OK);
}

#[tokio::test]
async fn session_endpoints() {
    let app = app();

    let created = send(&app, Method::POST, "/api/sessions", None).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let session = created.json()["sessionId"].as_str().unwrap().to_string();

    let path = format!("/api/sessions/{session}/measurements?include=name");
    send(&app, Method::POST, &path, Some(r#"{"red":10,"green":10,"blue":10}"#)).await;
    let reading = send(&app, Method::POST, &path, Some(r#"{"red":90,"green":90,"blue":90}"#)).await;
    assert_eq!(reading.status, StatusCode::CREATED);
    let reading = reading.json();
    assert_eq!(reading["color"]["rgbAveraged"]["red"], 50);
    assert_eq!(reading["color"]["nearestName"], "black");
    assert!(reading["color"].get("hsl").is_none());
    assert_eq!(reading["measurement"]["red"], 90);

    let zero = send(&app, Method::POST, &path, Some(r#"{"red":0,"green":1,"blue":1}"#)).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let reset = send(&app, Method::POST, &format!("/api/sessions/{session}/reset"), None).await;
    assert_eq!(reset.status, StatusCode::NO_CONTENT);

    let deleted = send(&app, Method::DELETE, &format!("/api/sessions/{session}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let gone = send(&app, Method::POST, &path, Some(r#"{"red":1,"green":1,"blue":1}"#)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn calibration_and_palette() {
    let app = app();

    let initial = send(&app, Method::GET, "/api/calibration", None).await.json();
    assert_eq!(initial["red"], 1.0);

    let updated = send(
        &app,
        Method::PUT,
        "/api/calibration",
        Some(r#"{"red":0.5,"green":1.0,"blue":1.0}"#),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);

    let rejected = send(
        &app,
        Method::PUT,
        "/api/calibration",
        Some(r#"{"red":-2,"green":1.0,"blue":1.0}"#),
    )
    .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);

    let created = send(
        &app,
        Method::POST,
        "/api/measurements",
        Some(r#"{"red":200,"green":10,"blue":10}"#),
    )
    .await
    .json();
    let color = send(
        &app,
        Method::GET,
        &format!("/api/measurements/{}/color", created["id"]),
        None,
    )
    .await
    .json();
    assert_eq!(color["rgbAveraged"]["red"], 100);

    let palette = send(&app, Method::GET, "/api/palette", None).await.json();
    assert_eq!(palette.as_array().unwrap().len(), 12);

    let health = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.text(), "ok");
}
