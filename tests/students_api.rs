use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use student_service::{app, AppState, MemoryStudentStore, StudentService};

const BODY_LIMIT: usize = 64 * 1024;

fn test_app() -> Router {
    let service = StudentService::new(Arc::new(MemoryStudentStore::new()));
    app(AppState::new(service), BODY_LIMIT)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
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
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: Method, uri: &str, body: impl Into<Body>) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

/// Sends a raw JSON payload, optionally declaring its `Content-Length`, and parses the reply.
async fn send_bytes(
    app: &Router,
    method: Method,
    uri: &str,
    body: String,
    with_length: bool,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if with_length {
        builder = builder.header("content-length", body.len());
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ann() -> Value {
    json!({"firstName": "Ann", "lastName": "Lee", "email": "ann@x.com"})
}

#[tokio::test]
async fn full_lifecycle() {
    let app = test_app();

    let (status, created) = send(&app, Method::POST, "/students", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        created,
        json!({"id": 1, "firstName": "Ann", "lastName": "Lee", "email": "ann@x.com"})
    );

    let (status, fetched) = send(&app, Method::GET, "/students/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/students/1",
        Some(json!({"firstName": "Ann", "lastName": "Lee", "email": "ann2@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["email"], "ann2@x.com");

    let (status, body) = send(&app, Method::DELETE, "/students/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/students/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found with id: 1");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = test_app();

    let (status, _) = send(&app, Method::POST, "/students", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/students", Some(ann())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Email already exists"));

    let (_, all) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_into_taken_email_is_conflict() {
    let app = test_app();
    send(&app, Method::POST, "/students", Some(ann())).await;
    send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"firstName": "Bo", "lastName": "Kim", "email": "bo@x.com"})),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/students/2",
        Some(json!({"firstName": "Bo", "lastName": "Kim", "email": "ann@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, bo) = send(&app, Method::GET, "/students/2", None).await;
    assert_eq!(bo["email"], "bo@x.com");
}

#[tokio::test]
async fn path_id_overrides_body_id() {
    let app = test_app();
    send(&app, Method::POST, "/students", Some(ann())).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/students/1",
        Some(json!({"id": 500, "firstName": "Annie", "lastName": "Lee", "email": "ann@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["firstName"], "Annie");
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let app = test_app();

    let (status, _) = send(&app, Method::PUT, "/students/9", Some(ann())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/students/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn list_with_and_without_trailing_slash() {
    let app = test_app();
    send(&app, Method::POST, "/students/", Some(ann())).await;

    let (status, a) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, b) = send(&app, Method::GET, "/students/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(a, b);
    assert_eq!(a.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_filters() {
    let app = test_app();
    for body in [
        ann(),
        json!({"firstName": "Ann", "lastName": "Kim", "email": "ann.kim@x.com"}),
        json!({"firstName": "Bo", "lastName": "Lee", "email": "bo@x.com"}),
    ] {
        let (status, _) = send(&app, Method::POST, "/students", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, by_first) = send(&app, Method::GET, "/students?firstName=Ann", None).await;
    assert_eq!(by_first.as_array().unwrap().len(), 2);

    let (_, by_last) = send(&app, Method::GET, "/students?lastName=Lee", None).await;
    assert_eq!(by_last.as_array().unwrap().len(), 2);

    let (_, both) = send(&app, Method::GET, "/students?firstName=Ann&lastName=Kim", None).await;
    assert_eq!(both.as_array().unwrap().len(), 1);
    assert_eq!(both[0]["email"], "ann.kim@x.com");

    let (_, by_email) = send(&app, Method::GET, "/students?email=bo@x.com", None).await;
    assert_eq!(by_email[0]["id"], 3);

    let (status, none) = send(&app, Method::GET, "/students?email=zed@x.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/students/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid ID format");

    let (status, body) = send(&app, Method::GET, "/students/1/extra", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid path");

    assert_eq!(
        send_raw(&app, Method::POST, "/students", "{not json").await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        send_raw(&app, Method::POST, "/students", r#"{"firstName":"Ann"}"#).await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        send_raw(&app, Method::PUT, "/students/x", r#"{"firstName":"Ann"}"#).await,
        StatusCode::BAD_REQUEST
    );

    let (status, _) = send(
        &app,
        Method::POST,
        "/students",
        Some(json!({"firstName": "Ann", "lastName": "Lee", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_verbs_are_rejected() {
    let app = test_app();
    let (status, _) = send(&app, Method::PATCH, "/students/1", Some(ann())).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::DELETE, "/students", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn head_is_answered_like_get() {
    let app = test_app();
    send(&app, Method::POST, "/students", Some(ann())).await;
    assert_eq!(send_raw(&app, Method::HEAD, "/students", Body::empty()).await, StatusCode::OK);
    assert_eq!(send_raw(&app, Method::HEAD, "/students/1", Body::empty()).await, StatusCode::OK);
    assert_eq!(
        send_raw(&app, Method::HEAD, "/students/9", Body::empty()).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = test_app();
    let huge = "a".repeat(BODY_LIMIT + 1);
    let body = json!({"firstName": huge, "lastName": "Lee", "email": "ann@x.com"}).to_string();

    let (status, error) = send_bytes(&app, Method::POST, "/students", body.clone(), false).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(error["error"].is_string(), "got {error}");

    let (status, error) = send_bytes(&app, Method::PUT, "/students/1", body, true).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(error["error"].is_string(), "got {error}");

    let (_, all) = send(&app, Method::GET, "/students", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn health_and_build_info_routes() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (status, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "student-service");
}
