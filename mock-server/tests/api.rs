use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, TOKEN_HEADER};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "test-token";

async fn envelope(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(TOKEN_HEADER, TOKEN)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(TOKEN_HEADER, TOKEN)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn delete(uri: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(TOKEN_HEADER, TOKEN)
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_rejected_in_envelope() {
    let resp = app(TOKEN)
        .oneshot(
            Request::builder()
                .uri("/properties")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = envelope(resp).await;
    assert_eq!(body["error_code"], 401);
    assert_eq!(body["error_msg"], "invalid token");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let resp = app("other-token").oneshot(get("/properties")).await.unwrap();
    assert_eq!(envelope(resp).await["error_code"], 401);
}

// --- properties ---

#[tokio::test]
async fn properties_paginate_with_total() {
    let resp = app(TOKEN)
        .oneshot(get("/properties?offset=1&limit=1"))
        .await
        .unwrap();

    let body = envelope(resp).await;
    assert_eq!(body["error_code"], 200);
    assert_eq!(body["data"]["total"], 3);
    let page = body["data"]["properties"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], 8);
}

#[tokio::test]
async fn every_response_has_a_request_id() {
    let first = envelope(app(TOKEN).oneshot(get("/webhooks")).await.unwrap()).await;
    let second = envelope(app(TOKEN).oneshot(get("/webhooks")).await.unwrap()).await;
    assert!(!first["request_id"].as_str().unwrap().is_empty());
    assert_ne!(first["request_id"], second["request_id"]);
}

// --- reservations ---

#[tokio::test]
async fn create_reservation_for_unknown_property_returns_404_code() {
    let resp = app(TOKEN)
        .oneshot(json_request(
            "POST",
            "/reservations",
            r#"{"property_id":"999","check_in_date":"2024-07-01","check_out_date":"2024-07-03","guest_name":"Bo"}"#,
        ))
        .await
        .unwrap();

    let body = envelope(resp).await;
    assert_eq!(body["error_code"], 404);
    assert_eq!(body["error_msg"], "property not found");
}

#[tokio::test]
async fn cancel_unknown_reservation_returns_404_code() {
    let resp = app(TOKEN)
        .oneshot(delete("/reservations/nope"))
        .await
        .unwrap();
    assert_eq!(envelope(resp).await["error_code"], 404);
}

#[tokio::test]
async fn conversations_require_paging() {
    let resp = app(TOKEN).oneshot(get("/conversations")).await.unwrap();
    assert_eq!(envelope(resp).await["error_code"], 400);
}

// --- full lifecycle ---

#[tokio::test]
async fn reservation_and_webhook_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/reservations",
            r#"{"property_id":"7","check_in_date":"2024-07-01","check_out_date":"2024-07-03","guest_name":"Bo","number_of_guests":3}"#,
        ))
        .await
        .unwrap();
    let body = envelope(resp).await;
    assert_eq!(body["error_code"], 200);
    let code = body["data"]["reservation"]["reservation_code"]
        .as_str()
        .unwrap()
        .to_string();

    // filter by code
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/reservations?reservation_code={code}")))
        .await
        .unwrap();
    let body = envelope(resp).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["reservations"][0]["number_of_guests"], 3);

    // cancel twice
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete(&format!("/reservations/{code}")))
        .await
        .unwrap();
    assert_eq!(envelope(resp).await["error_code"], 200);
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete(&format!("/reservations/{code}")))
        .await
        .unwrap();
    assert_eq!(envelope(resp).await["error_code"], 409);

    // webhook create, delete, delete again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/webhooks",
            r#"{"url":"https://example.com/hook"}"#,
        ))
        .await
        .unwrap();
    let body = envelope(resp).await;
    let id = body["data"]["webhook"]["id"].as_u64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete(&format!("/webhooks/{id}")))
        .await
        .unwrap();
    assert_eq!(envelope(resp).await["error_code"], 200);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(delete(&format!("/webhooks/{id}")))
        .await
        .unwrap();
    let body = envelope(resp).await;
    assert_eq!(body["error_code"], 404);
    assert_eq!(body["error_msg"], "webhook not found");

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/webhooks"))
        .await
        .unwrap();
    let body = envelope(resp).await;
    assert!(body["data"]["webhooks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn calendar_updates_are_visible_in_calendar() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/listings/prices",
            r#"{"channel_type":"airbnb","listing_id":"A7","prices":[{"date":"2024-06-02","price":180}]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(envelope(resp).await["error_code"], 200);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/listings/calendar",
            r#"{"start_date":"2024-06-01","end_date":"2024-06-07","listings":[{"channel_type":"airbnb","listing_id":"A7"}]}"#,
        ))
        .await
        .unwrap();
    let body = envelope(resp).await;
    let day = &body["data"]["listings"][0]["calendar"][0];
    assert_eq!(day["date"], "2024-06-02");
    assert_eq!(day["price"], 180);
}
