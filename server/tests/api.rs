//! HTTP contract tests driving the router in-process.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use serde_json::{json, Value};
use tower::ServiceExt;

use depot_server::repository::init_db;
use depot_server::{app, AppState};

fn test_app() -> Router {
    let db = init_db(Path::new(":memory:")).expect("in-memory database");
    app(AppState::new(db), &["http://localhost:5173".to_string()])
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn inventory_body(name: &str) -> Value {
    json!({
        "name": name,
        "quantity": 5,
        "location": "Gudang A",
        "status": "Tersedia",
        "itemCode": "INV-001"
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_inventory_lifecycle() {
    let app = test_app();

    let (status, created) = send(&app, Method::POST, "/api/inventory", Some(inventory_body("Relay"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_u64().unwrap();

    let (status, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let mut edited = inventory_body("Relay 24V");
    edited["quantity"] = json!(9);
    let (status, updated) = send(&app, Method::PUT, &format!("/api/inventory/{id}"), Some(edited)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Relay 24V");

    let (_, fetched) = send(&app, Method::GET, &format!("/api/inventory/{id}"), None).await;
    assert_eq!(fetched["quantity"], 9);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/inventory/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, list) = send(&app, Method::GET, "/api/inventory", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_statuses() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/inventory/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid id"));

    let (status, body) = send(&app, Method::GET, "/api/inventory/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::DELETE, "/api/overhaul/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/api/inventory", Some(json!({"name": "Relay"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("location"));

    let (status, body) = send(&app, Method::POST, "/api/inventory", Some(json!({"quantity": "many"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_engineering_requires_team() {
    let app = test_app();
    let body = json!({
        "name": "Signal System",
        "status": "Desain",
        "team": [],
        "deadline": "2024-12-01",
        "progress": 0
    });
    let (status, err) = send(&app, Method::POST, "/api/rekayasa", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("team"));
}

#[tokio::test]
async fn test_assign_profile() {
    let app = test_app();
    let (_, person) = send(
        &app,
        Method::POST,
        "/api/personalia",
        Some(json!({
            "nip": "1987",
            "jabatan": "Teknisi",
            "divisi": "Produksi",
            "status": "Aktif",
            "joinDate": "2020-02-01",
            "phoneNumber": "0812",
            "urgentNumber": "0813"
        })),
    )
    .await;
    let (_, profile) = send(
        &app,
        Method::POST,
        "/api/profile",
        Some(json!({"email": "andi@example.com", "address": "Bandung", "phoneNumber": "0812"})),
    )
    .await;
    let uri = format!("/api/personalia/{}/assign-profile", person["id"]);

    let (status, linked) = send(&app, Method::PUT, &uri, Some(json!({"profile_id": profile["id"]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(linked["profile_id"], profile["id"]);

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"profile_id": 999}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, unlinked) = send(&app, Method::PUT, &uri, Some(json!({"profile_id": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(unlinked["profile_id"].is_null());
}

#[tokio::test]
async fn test_qc_listing_and_code_lookup() {
    let app = test_app();

    let (status, stored) = send(
        &app,
        Method::POST,
        "/api/qc",
        Some(json!({
            "product": "Battery Pack",
            "batch": "B-01",
            "status": "Lulus",
            "tested": 120,
            "passed": 82,
            "date": "2024-04-02",
            "department": "Kalibrasi"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(stored["passRate"], 68);
    let code = stored["id"].as_str().unwrap().to_string();
    assert!(code.starts_with("KAL-"));

    send(
        &app,
        Method::POST,
        "/api/produksi",
        Some(json!({
            "name": "Radio Lokomotif",
            "target": 10,
            "completed": 10,
            "status": "Selesai",
            "startDate": "2024-01-02",
            "endDate": "2024-02-01"
        })),
    )
    .await;

    let (_, list) = send(&app, Method::GET, "/api/qc", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    let derived = list.iter().find(|e| e["source"] == "produksi").unwrap();
    assert_eq!(derived["status"], "Lulus");
    assert_eq!(derived["passRate"], 100);

    let (status, found) = send(&app, Method::GET, &format!("/api/qc/frontend/{code}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["batch"], "B-01");

    let (status, _) = send(&app, Method::GET, "/api/qc/frontend/KAL-999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::GET, "/api/qc/frontend/garbage", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_exports_carry_attachment_headers() {
    let app = test_app();
    send(&app, Method::POST, "/api/inventory", Some(inventory_body("Relay"))).await;

    for (suffix, mime) in [
        ("excel", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("pdf", "application/pdf"),
    ] {
        let request = Request::builder()
            .uri(format!("/api/inventory/export/{suffix}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], mime);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=inventory_data_"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
    }
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/inventory")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "route not found");
}

#[tokio::test]
async fn test_collection_path_accepts_trailing_slash() {
    let app = test_app();

    let (status, _) = send(&app, Method::POST, "/api/inventory/", Some(inventory_body("Relay"))).await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in ["/api/inventory/", "/api/qc/", "/api/profile/"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_array(), "{uri}");
    }
    let (_, list) = send(&app, Method::GET, "/api/inventory/", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stock_ignores_client_last_update() {
    let app = test_app();
    let stale = "1999-01-01T00:00:00Z";
    let mut body = json!({
        "itemName": "Relay",
        "quantity": 4,
        "location": "Rak 1",
        "status": "Tersedia",
        "lastUpdate": stale
    });

    let (status, created) = send(&app, Method::POST, "/api/stock", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let stale = DateTime::parse_from_rfc3339(stale).unwrap();
    let first = DateTime::parse_from_rfc3339(created["lastUpdate"].as_str().unwrap()).unwrap();
    assert!(first > stale);

    body["quantity"] = json!(6);
    let uri = format!("/api/stock/{}", created["id"]);
    let (status, updated) = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let second = DateTime::parse_from_rfc3339(updated["lastUpdate"].as_str().unwrap()).unwrap();
    assert!(second >= first);
}
