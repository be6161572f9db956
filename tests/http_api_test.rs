// ==========================================
// HTTP 接口测试
// ==========================================
// 测试目标: 路由、状态码、响应体与下载响应头
// ==========================================


use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use excel_user_import::app::{build_router, AppState};
use excel_user_import::config::{AppConfig, ImportSettings};
use excel_user_import::importer::XLSX_CONTENT_TYPE;
use excel_user_import::repository::UserRecordRepositoryImpl;
use std::net::SocketAddr;
use tempfile::NamedTempFile;
use test_helpers::{build_workbook, create_test_db, multipart_body, user_header, valid_row};
use tower::ServiceExt;

const BOUNDARY: &str = "----excel-user-import-boundary";

fn test_config(db_path: &str, max_upload_bytes: usize) -> AppConfig {
    AppConfig {
        db_path: db_path.to_string(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        import: ImportSettings::default(),
        max_upload_bytes,
        export_file_name: "User Demo.xlsx".to_string(),
    }
}

fn test_app(max_upload_bytes: usize) -> (NamedTempFile, Router) {
    let (tmp, db_path) = create_test_db().unwrap();
    let config = test_config(&db_path, max_upload_bytes);
    let repo = UserRecordRepositoryImpl::new(&db_path).unwrap();
    let state = AppState::with_repository(repo, &config);
    (tmp, build_router(state))
}

fn upload_request(field: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let body = multipart_body(BOUNDARY, field, "users.xlsx", content_type, bytes);
    Request::builder()
        .method("POST")
        .uri("/api/excel/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_upload_success_returns_200() {
    let (_tmp, app) = test_app(10 * 1024 * 1024);
    let bytes = build_workbook(&[user_header(), valid_row("alice", 30.0)]);

    let resp = app
        .oneshot(upload_request("file", XLSX_CONTENT_TYPE, &bytes))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let v = json_body(resp).await;
    assert_eq!(v["fileName"], "users.xlsx");
    assert_eq!(v["status"], "Success - 1 records processed successfully");
    assert_eq!(v["recordsProcessed"], 1);
    assert_eq!(v["size"], bytes.len());
    assert!(v.get("errors").is_none());
    assert!(v["uploadDate"].is_string());
}

#[tokio::test]
async fn test_partial_success_returns_400_with_outcome() {
    let (_tmp, app) = test_app(10 * 1024 * 1024);
    let bytes = build_workbook(&[
        user_header(),
        valid_row("alice", 30.0),
        valid_row("bob", 151.0),
    ]);

    let resp = app
        .oneshot(upload_request("file", XLSX_CONTENT_TYPE, &bytes))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let v = json_body(resp).await;
    assert_eq!(v["status"], "Partial success - 1 records processed with 1 errors");
    assert_eq!(v["recordsProcessed"], 1);
    assert_eq!(
        v["errors"][0],
        "Error processing row 3: Age must be between 0 and 150"
    );
}

#[tokio::test]
async fn test_non_excel_upload_returns_400_failed() {
    let (_tmp, app) = test_app(10 * 1024 * 1024);

    let resp = app
        .oneshot(upload_request("file", "text/csv", b"username,email\n"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let v = json_body(resp).await;
    assert_eq!(v["status"], "Failed");
    assert_eq!(v["recordsProcessed"], 0);
}

#[tokio::test]
async fn test_missing_file_part_returns_error_response() {
    let (_tmp, app) = test_app(10 * 1024 * 1024);

    let resp = app
        .oneshot(upload_request("attachment", XLSX_CONTENT_TYPE, b"PK\x03\x04"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let v = json_body(resp).await;
    assert_eq!(v["status"], 400);
    assert_eq!(v["error"], "Validation Error");
}

#[tokio::test]
async fn test_oversized_upload_returns_413() {
    let (_tmp, app) = test_app(1024);
    let bytes = vec![b'x'; 4096];

    let resp = app
        .oneshot(upload_request("file", XLSX_CONTENT_TYPE, &bytes))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let v = json_body(resp).await;
    assert_eq!(v["status"], 413);
    assert_eq!(v["message"], "File size exceeds the maximum allowed limit");
}

#[tokio::test]
async fn test_download_headers() {
    let (_tmp, app) = test_app(10 * 1024 * 1024);

    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/excel/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers().clone();
    assert_eq!(headers[header::CONTENT_TYPE], XLSX_CONTENT_TYPE);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"User%20Demo.xlsx\""
    );
    assert_eq!(headers[header::CACHE_CONTROL], "no-store,no-cache,must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers["x-content-type-options"], "nosniff");

    let body = to_bytes(resp.into_body(), 10 * 1024 * 1024).await.unwrap();
    assert_eq!(&body[..2], b"PK");
    assert_eq!(
        headers[header::CONTENT_LENGTH].to_str().unwrap(),
        body.len().to_string()
    );
}
