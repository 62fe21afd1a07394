//! Integration tests for the `Submitted` extractor
//!
//! These tests mount a handler behind a router and post urlencoded bodies to
//! it, checking both the accepted values and the rejection responses.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use formdate::prelude::*;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

const FORM: &str = r#"
fields:
  name:
    validate: [required]
  dob:
    validate: [required]
"#;

async fn post_dob(Submitted(values): Submitted) -> String {
    values["dob-formatted"].as_str().unwrap_or_default().to_string()
}

fn app() -> Router {
    let controller = Arc::new(FormController::from_yaml_str(FORM).unwrap());
    Router::new().route("/dob", post(post_dob)).with_state(controller)
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/dob")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_valid_submission_reaches_handler() {
    let response = app()
        .oneshot(form_request("name=Joe&dob-year=1999&dob-month=12&dob-day=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"1 December 1999");
}

#[tokio::test]
async fn test_invalid_submission_is_rejected_with_field_errors() {
    let response = app()
        .oneshot(form_request("name=Joe&dob-year=1999&dob-month=13&dob-day=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await,
        json!({
            "error": "Validation failed",
            "errors": {
                "dob-month": { "key": "dob-month", "type": "date-month" }
            }
        })
    );
}

#[tokio::test]
async fn test_blank_date_reports_required_parts() {
    let response = app()
        .oneshot(form_request("name=Joe&dob-year=&dob-month=&dob-day="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_json(response).await["errors"].clone();
    let keys: Vec<&str> = errors.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["dob", "dob-year", "dob-month", "dob-day"] {
        assert!(keys.contains(&key), "missing error for {key}");
        assert_eq!(errors[key]["type"], json!("required"));
    }
}

#[tokio::test]
async fn test_wrong_content_type_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/dob")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], json!("Invalid form body"));
}

#[tokio::test]
async fn test_misconfigured_form_is_server_error() {
    let controller = Arc::new(
        FormController::from_yaml_str("fields: { code: { validate: [postcode] } }").unwrap(),
    );
    let app = Router::new().route("/dob", post(post_dob)).with_state(controller);

    let response = app.oneshot(form_request("code=SW1A")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], json!("UNKNOWN_VALIDATOR"));
}
