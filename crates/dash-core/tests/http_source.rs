//! `HttpDataSource` against a local axum server

use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use dash_core::{ApiSettings, DashboardDataSource, DashboardError, HttpDataSource};
use dash_roles::RoleCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;

const TOKEN: &str = "secret-token";

async fn unified(Path(role): Path<String>, headers: HeaderMap) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }

    match role.as_str() {
        "pm" => Json(json!({"code": 200, "data": {"task-list": {"count": 4}}})).into_response(),
        "sales" => Json(json!({"sales-funnel": [3, 2, 1]})).into_response(),
        "hr" => Json(json!({"code": 40301, "message": "no permission", "data": null})).into_response(),
        "finance" => (StatusCode::INTERNAL_SERVER_ERROR, "database down").into_response(),
        "warehouse" => Json(json!([1, 2, 3])).into_response(),
        "ops" => Json(json!({"shift-board": "day"})).into_response(),
        "ops#night" => Json(json!({"shift-board": "night"})).into_response(),
        "production" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({})).into_response()
        }
        _ => Json(json!({})).into_response(),
    }
}

async fn serve() -> SocketAddr {
    let app = Router::new().route("/api/dashboard/unified/:role", get(unified));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn source(addr: SocketAddr) -> HttpDataSource {
    HttpDataSource::new(format!("http://{addr}/api"))
        .unwrap()
        .with_bearer_token(TOKEN)
}

#[tokio::test]
async fn envelope_and_plain_bodies() {
    let source = source(serve().await);

    let pm = source.fetch(&RoleCode::new("pm")).await.unwrap();
    assert_eq!(pm.get("task-list"), Some(&json!({"count": 4})));

    let sales = source.fetch(&RoleCode::new("sales")).await.unwrap();
    assert_eq!(sales.len(), 1);

    let unknown = source.fetch(&RoleCode::new("gm")).await.unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn error_classes() {
    let source = source(serve().await);

    let err = source.fetch(&RoleCode::new("finance")).await.unwrap_err();
    assert_eq!(
        err,
        DashboardError::Status {
            status: 500,
            body: "database down".to_string()
        }
    );
    assert!(err.is_retryable());

    let err = source.fetch(&RoleCode::new("hr")).await.unwrap_err();
    assert!(matches!(err, DashboardError::Rejected { code: 40301, .. }));

    let err = source.fetch(&RoleCode::new("warehouse")).await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidPayload(_)));
}

#[tokio::test]
async fn reserved_characters_stay_in_the_role_segment() {
    let source = source(serve().await);

    let night = source.fetch(&RoleCode::new("ops#night")).await.unwrap();
    assert_eq!(night.get("shift-board"), Some(&json!("night")));

    let day = source.fetch(&RoleCode::new("ops")).await.unwrap();
    assert_eq!(day.get("shift-board"), Some(&json!("day")));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let addr = serve().await;
    let source = HttpDataSource::new(format!("http://{addr}/api")).unwrap();

    let err = source.fetch(&RoleCode::new("pm")).await.unwrap_err();
    assert!(matches!(err, DashboardError::Status { status: 401, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn configured_timeout_applies() {
    let addr = serve().await;
    let settings = ApiSettings {
        base_url: format!("http://{addr}/api"),
        timeout_secs: Some(1),
        bearer_token: Some(TOKEN.to_string()),
    };
    let source = HttpDataSource::from_settings(&settings).unwrap();

    let err = source.fetch(&RoleCode::new("production")).await.unwrap_err();
    assert_eq!(err, DashboardError::Timeout { duration_secs: 1 });
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let source = HttpDataSource::new("http://127.0.0.1:9/api").unwrap();
    let err = source.fetch(&RoleCode::new("pm")).await.unwrap_err();
    assert!(matches!(err, DashboardError::Transport(_)));
}
