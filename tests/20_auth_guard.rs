mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;

// Every /api route sits behind the JWT layer; requests with no or bad
// credentials must be rejected before any handler runs.

#[tokio::test]
async fn api_routes_require_a_token() -> Result<()> {
    let store_id = "7f1f64ab-93e8-4a31-a5ce-cf7608cf3eb4";
    let uris = [
        "/api/auth/whoami".to_string(),
        "/api/stores".to_string(),
        format!("/api/{}/billboards", store_id),
        format!("/api/{}/categories", store_id),
        format!("/api/{}/sizes", store_id),
        format!("/api/{}/colors", store_id),
        format!("/api/{}/products", store_id),
        format!("/api/{}/orders", store_id),
    ];

    for uri in &uris {
        let (status, body) = common::send(common::get(uri)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "expected 401 for {}", uri);
        assert_eq!(body["code"], "UNAUTHORIZED", "unexpected body for {}: {}", uri, body);
    }

    Ok(())
}

#[tokio::test]
async fn mutations_require_a_token_too() -> Result<()> {
    let (status, body) = common::send(common::post_json(
        "/api/stores",
        json!({ "name": "my store" }),
    ))
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() -> Result<()> {
    let (status, body) =
        common::send(common::get_with_auth("/api/stores", "not.a.real.jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let request = Request::builder()
        .uri("/api/stores")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(Body::empty())?;

    let (status, body) = common::send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    Ok(())
}
