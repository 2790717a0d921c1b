mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let (status, body) = common::send(common::get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "shopkeep-api");

    let endpoints = body["data"]["endpoints"]
        .as_object()
        .expect("endpoint directory");
    assert!(endpoints.contains_key("stores"));
    assert!(endpoints.contains_key("orders"));

    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404() -> Result<()> {
    let (status, _) = common::send(common::get("/no-such-route")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
