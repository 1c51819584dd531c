use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use pantry::{AppState, InMemoryGateway, Inventory, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> axum::Router {
    let inventory = Inventory::new(Arc::new(InMemoryGateway::new()));
    build_router(AppState::new(inventory))
}

async fn send(app: &axum::Router, method: Method, uri: &str, payload: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match payload {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

fn item_names(body: &Value) -> Vec<String> {
    body["data"]["items"]
        .as_array()
        .expect("items array")
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn healthcheck_responds() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "ok");
}

#[tokio::test]
async fn add_and_list_items() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "apples", "quantity": 3, "category": "Fruits"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let item = &body["data"]["items"][0];
    assert_eq!(item["name"], "apples");
    assert_eq!(item["displayName"], "Apples");
    assert_eq!(item["quantity"], 3);
    assert_eq!(item["category"], "Fruits");
    assert_eq!(body["data"]["state"]["state"], "clean");

    send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "Bread", "quantity": 1})),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/v1/items?sort=alphabetical", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_names(&body), vec!["apples", "Bread"]);

    let (_, body) = send(&app, Method::GET, "/api/v1/items?search=BRE", None).await;
    assert_eq!(item_names(&body), vec!["Bread"]);
    assert_eq!(body["data"]["items"][0]["category"], "Undefined");
}

#[tokio::test]
async fn category_conflict_is_409_and_sets_state() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "tomato", "quantity": 2, "category": "Fruits"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "tomato", "quantity": 1, "category": "Vegetables"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "category_conflict");
    assert!(body["error"].as_str().unwrap().contains("Vegetables"));

    let (_, body) = send(&app, Method::GET, "/api/v1/state", None).await;
    assert_eq!(body["data"]["state"], "errored");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/state/error", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/api/v1/state", None).await;
    assert_eq!(body["data"]["state"], "clean");

    let (_, body) = send(&app, Method::GET, "/api/v1/items", None).await;
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn increment_and_decrement_routes() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/v1/items/flour/increment", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 1);
    assert_eq!(body["data"]["items"][0]["category"], "Uncategorized");

    send(&app, Method::POST, "/api/v1/items/flour/increment", None).await;
    let (_, body) = send(&app, Method::POST, "/api/v1/items/flour/decrement", None).await;
    assert_eq!(body["data"]["items"][0]["quantity"], 1);

    let (status, body) = send(&app, Method::POST, "/api/v1/items/flour/decrement", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(item_names(&body).is_empty());

    let (status, _) = send(&app, Method::POST, "/api/v1/items/ghost/decrement", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_quantity_route() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "green beans", "quantity": 5, "category": "Vegetables"})),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/v1/items/green%20beans?amount=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["quantity"], 3);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/items/green%20beans?amount=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(item_names(&body).is_empty());

    let (status, body) = send(&app, Method::DELETE, "/api/v1/items/green%20beans", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn empty_name_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "", "quantity": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_key");
}

#[tokio::test]
async fn categories_route_lists_enumeration() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["categories"],
        json!([
            "Fruits",
            "Vegetables",
            "Dairy and Eggs",
            "Meat and Poultry",
            "Fish and Seafood",
            "Undefined"
        ])
    );
    assert_eq!(body["data"]["sort_modes"][0]["value"], "quantity-asc");
    assert_eq!(body["data"]["sort_modes"][0]["label"], "Quantity (Ascending)");
}

#[tokio::test]
async fn unlisted_category_is_rejected_without_writing() {
    let app = app();
    for category in ["fruits", "Snacks", "Uncategorized"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/items",
            Some(json!({"name": "apples", "quantity": 2, "category": category})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
        assert!(body["error"].as_str().unwrap().contains(category));
    }

    let (_, body) = send(&app, Method::GET, "/api/v1/items", None).await;
    assert!(item_names(&body).is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"name": "apples", "quantity": 1, "category": "Fruits"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["category"], "Fruits");
}

#[tokio::test]
async fn undecodable_requests_use_error_envelope() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/items",
        Some(json!({"quantity": 1})),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(body["code"], "invalid_request");
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::DELETE, "/api/v1/items/apples?amount=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}
