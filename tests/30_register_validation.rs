mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

// Registration payloads are validated before any database access, so the
// 400 surface is testable without a running Postgres.

#[tokio::test]
async fn register_rejects_bad_email() -> Result<()> {
    let (status, body) = common::send(common::post_json(
        "/auth/register",
        json!({ "email": "not-an-email", "name": "Owner", "password": "longenough" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    Ok(())
}

#[tokio::test]
async fn register_rejects_missing_name() -> Result<()> {
    let (status, body) = common::send(common::post_json(
        "/auth/register",
        json!({ "email": "owner@example.com", "password": "longenough" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["name"], "This field is required");

    Ok(())
}

#[tokio::test]
async fn register_rejects_short_password() -> Result<()> {
    let (status, body) = common::send(common::post_json(
        "/auth/register",
        json!({ "email": "owner@example.com", "name": "Owner", "password": "short" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    Ok(())
}

#[tokio::test]
async fn login_rejects_missing_password() -> Result<()> {
    let (status, body) = common::send(common::post_json(
        "/auth/login",
        json!({ "email": "owner@example.com" }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["password"], "This field is required");

    Ok(())
}
