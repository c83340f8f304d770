use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use liblend::api;
use liblend::db;
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::api_router(db)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

fn json_request(method: &str, uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_get_book_not_found() {
    let app = setup_test_app().await;

    let response = app.oneshot(empty_request("GET", "/books/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Book not found");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["timezone"], "UTC");
}

#[tokio::test]
async fn test_get_person_not_found() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(empty_request("GET", "/people/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Person not found");
}

#[tokio::test]
async fn test_mutations_on_missing_records_are_404() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({ "name": "Dune", "author": "Frank Herbert" });
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/books/999", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/books/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/books/999/revive"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("GET", "/books/999/owner"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_missing_title() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({ "author": "Frank Herbert" });
    let response = app
        .oneshot(json_request("POST", "/books/new", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name : Title shouldn't be empty"));
}

#[tokio::test]
async fn test_create_book_missing_every_required_field() {
    let app = setup_test_app().await;

    // Fragments for every failing field, concatenated
    let payload = serde_json::json!({ "name": "", "author": "" });
    let response = app
        .oneshot(json_request("POST", "/books/new", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name : Title shouldn't be empty"));
    assert!(message.contains("author : Author shouldn't be empty"));
}

#[tokio::test]
async fn test_create_person_missing_name() {
    let app = setup_test_app().await;

    let payload = serde_json::json!({ "age": 30 });
    let response = app
        .oneshot(json_request("POST", "/people/new", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name : Name shouldn't be empty"));
}

#[tokio::test]
async fn test_update_has_same_validation_contract_as_create() {
    let app = setup_test_app().await;

    let create = serde_json::json!({ "name": "Dune", "author": "Frank Herbert" });
    app.clone()
        .oneshot(json_request("POST", "/books/new", &create))
        .await
        .unwrap();

    // Validation runs before the record lookup
    let payload = serde_json::json!({ "name": "", "author": "Frank Herbert" });
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/books/1", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The record is untouched by the rejected update
    let response = app
        .oneshot(empty_request("GET", "/books/1"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["name"], "Dune");
}

#[tokio::test]
async fn test_empty_person_books_listing_is_204() {
    let app = setup_test_app().await;

    // No check that the person exists; an unknown id reads as empty
    let response = app
        .oneshot(empty_request("GET", "/people/42/books"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = body_json(response).await;
    assert_eq!(body["message"], "There are no books");
}
