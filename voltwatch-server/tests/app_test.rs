use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use voltwatch_server::app::create_app;
use voltwatch_server::configs::{Bootstrap, Database, Hardware, Logger, Server, Settings};

fn settings(bootstrap: Option<Bootstrap>) -> Arc<Settings> {
    Arc::new(Settings {
        server: Server {
            host: String::from("127.0.0.1"),
            port: 0,
        },
        logger: Logger {
            level: String::from("debug"),
        },
        database: Database {
            migration_path: None,
            clean_start: true,
            url: String::from("sqlite::memory:"),
        },
        hardware: Hardware::default(),
        bootstrap,
    })
}

fn bootstrap() -> Bootstrap {
    Bootstrap {
        facility_name: String::from("Main Facility"),
        location: String::from("Unknown"),
        api_key: String::from("dev_hardware_key"),
        nominal_voltage: 230.0,
        reporting_interval: 120,
    }
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_bootstrap_key_is_accepted() {
    let router = create_app(&settings(Some(bootstrap()))).await.unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/hardware/config")
                .header("X-API-Key", "dev_hardware_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["config"]["reporting_interval"], 120);
    assert_eq!(body["config"]["electrical_monitoring"]["nominal_voltage"], 230.0);
    assert_eq!(body["config"]["electrical_monitoring"]["voltage_high_threshold"], 253.0);
}

#[tokio::test]
async fn test_without_bootstrap_no_key_is_accepted() {
    let router = create_app(&settings(None)).await.unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/hardware/status")
                .header("X-API-Key", "dev_hardware_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_openapi_document() {
    let router = create_app(&settings(None)).await.unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert!(body["paths"].get("/api/hardware/data").is_some());
}
