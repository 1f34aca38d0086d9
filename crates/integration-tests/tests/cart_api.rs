//! Integration tests for the cart API.
//!
//! The cart lives only in the `art-cart` cookie, so every test drives a
//! cookie-keeping client against a freshly spawned server.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use atelier_integration_tests::{TestServer, browser};
use atelier_storefront::config::StorefrontConfig;
use reqwest::{StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};

async fn body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_add_twice_then_zero_quantity() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    let first = client
        .post(server.url("/cart"))
        .json(&json!({ "id": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let set_cookie = first.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("art-cart="));
    assert!(set_cookie.contains("Max-Age=2592000"));
    let first = body(first).await;
    assert_eq!(first["totalItems"], 1);
    assert_eq!(first["cart"][0]["quantity"], 1);

    let second = body(
        client
            .post(server.url("/cart"))
            .json(&json!({ "id": "1" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(second["cart"].as_array().unwrap().len(), 1);
    assert_eq!(second["cart"][0]["quantity"], 2);
    assert_eq!(second["totalItems"], 2);

    let cleared = body(
        client
            .put(server.url("/cart/1"))
            .json(&json!({ "quantity": 0 }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(cleared, json!({ "cart": [], "totalItems": 0 }));

    let fetched = body(client.get(server.url("/cart")).send().await.unwrap()).await;
    assert_eq!(fetched["totalItems"], 0);
}

#[tokio::test]
async fn test_line_items_carry_artwork_fields() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    let summary = body(
        client
            .post(server.url("/cart"))
            .json(&json!({ "id": "2" }))
            .send()
            .await
            .unwrap(),
    )
    .await;
    let line = &summary["cart"][0];
    assert_eq!(line["id"], "2");
    assert_eq!(line["title"], "Abstract Dreams");
    assert_eq!(line["price"], 1200);
    assert_eq!(line["medium"], "Mixed Media");
}

#[tokio::test]
async fn test_update_missing_line_is_not_found() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    let response = client
        .put(server.url("/cart/99"))
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body(response).await["error"], "Item not found in cart");
}

#[tokio::test]
async fn test_add_unknown_artwork_is_not_found() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    let response = client
        .post(server.url("/cart"))
        .json(&json!({ "id": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(response).await["error"], "Artwork not found");
}

#[tokio::test]
async fn test_invalid_inputs_are_bad_requests() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    let missing_id = client
        .post(server.url("/cart"))
        .json(&json!({ "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_id.status(), StatusCode::BAD_REQUEST);

    let negative = client
        .put(server.url("/cart/1"))
        .json(&json!({ "quantity": -2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(negative.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(negative).await["error"], "Invalid quantity");
}

#[tokio::test]
async fn test_delete_absent_line_succeeds() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    client
        .post(server.url("/cart"))
        .json(&json!({ "id": "3" }))
        .send()
        .await
        .unwrap();

    let response = client.delete(server.url("/cart/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body(response).await;
    assert_eq!(summary["totalItems"], 1);
    assert_eq!(summary["cart"][0]["id"], "3");
}

#[tokio::test]
async fn test_checkout_empties_cart() {
    let server = TestServer::spawn().await.unwrap();
    let client = browser().unwrap();

    for id in ["1", "4", "4"] {
        client
            .post(server.url("/cart"))
            .json(&json!({ "id": id }))
            .send()
            .await
            .unwrap();
    }

    let receipt = client.post(server.url("/cart/checkout")).send().await.unwrap();
    assert_eq!(receipt.status(), StatusCode::OK);
    let receipt = body(receipt).await;
    assert_eq!(receipt["success"], true);
    assert_eq!(receipt["message"], "Checkout successful");

    let fetched = body(client.get(server.url("/cart")).send().await.unwrap()).await;
    assert_eq!(fetched, json!({ "cart": [], "totalItems": 0 }));
}

#[tokio::test]
async fn test_corrupt_cookie_reads_as_empty_cart() {
    let server = TestServer::spawn().await.unwrap();
    let client = reqwest::Client::new();

    for value in ["not-json", "%7B%22id%22", "%5B%7B%22id%22%3A1%7D%5D"] {
        let response = client
            .get(server.url("/cart"))
            .header(header::COOKIE, format!("art-cart={value}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await["totalItems"], 0);
    }
}

#[tokio::test]
async fn test_cookie_is_the_only_state() {
    let server = TestServer::spawn().await.unwrap();
    let shopper = browser().unwrap();
    let other = browser().unwrap();

    shopper
        .post(server.url("/cart"))
        .json(&json!({ "id": "1" }))
        .send()
        .await
        .unwrap();

    let fresh = body(other.get(server.url("/cart")).send().await.unwrap()).await;
    assert_eq!(fresh["totalItems"], 0);
}

#[tokio::test]
async fn test_signed_cookie_rejects_tampering() {
    let config = StorefrontConfig {
        cart_secret: Some(SecretString::from("k7Qz9vR2mXpL4wT8nB6yH1jF3dS5aG0cEuWq")),
        ..StorefrontConfig::default()
    };
    let server = TestServer::spawn_with(config).await.unwrap();
    let client = browser().unwrap();

    let added = client
        .post(server.url("/cart"))
        .json(&json!({ "id": "2" }))
        .send()
        .await
        .unwrap();
    let set_cookie = added.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let genuine = body(client.get(server.url("/cart")).send().await.unwrap()).await;
    assert_eq!(genuine["totalItems"], 1);

    // Lower the price inside the signed value.
    let forged = pair.replace("1200", "1");
    assert_ne!(forged, pair);
    let response = reqwest::Client::new()
        .get(server.url("/cart"))
        .header(header::COOKIE, forged)
        .send()
        .await
        .unwrap();
    assert_eq!(body(response).await["totalItems"], 0);
}
