use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use liblend::api;
use liblend::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use liblend::db;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Seed-style person insert; the public creation path cannot grant roles
async fn create_person(db: &DatabaseConnection, name: &str, password: &str, role: &str) -> i64 {
    let person = liblend::models::person::ActiveModel {
        name: Set(name.to_string()),
        role: Set(role.to_string()),
        password: Set(hash_password(password).expect("Failed to hash password")),
        created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
        created_by: Set(Some("system".to_string())),
        removed: Set(false),
        ..Default::default()
    };
    let person = person.insert(db).await.expect("Failed to create person");
    person.id
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

fn authed_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt("alice", "reader").expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.role, "reader");
}

#[tokio::test]
async fn test_login_flow() {
    let db = setup_test_db().await;
    create_person(&db, "admin", "admin_password", "admin").await;
    let app = api::api_router(db);

    // Success
    let payload = serde_json::json!({
        "username": "admin",
        "password": "admin_password"
    });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].is_string());

    // Wrong password
    let payload_bad = serde_json::json!({
        "username": "admin",
        "password": "wrong_password"
    });
    let req_bad = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload_bad).unwrap()))
        .unwrap();
    let response_bad = app.clone().oneshot(req_bad).await.unwrap();
    assert_eq!(response_bad.status(), StatusCode::UNAUTHORIZED);

    // Unknown name
    let payload_none = serde_json::json!({
        "username": "nobody",
        "password": "password"
    });
    let req_none = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload_none).unwrap()))
        .unwrap();
    let response_none = app.oneshot(req_none).await.unwrap();
    assert_eq!(response_none.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let db = setup_test_db().await;
    let app = api::api_router(db);

    // Guest
    let req = Request::builder()
        .uri("/books/unique")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Reader
    let reader_token = create_jwt("alice", "reader").unwrap();
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/books/unique", &reader_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Admin; empty store listing reuses the 204 contract
    let admin_token = create_jwt("admin", "admin").unwrap();
    let response = app
        .oneshot(authed_request("GET", "/books/unique", &admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_reader_routes_accept_reader_and_admin() {
    let db = setup_test_db().await;
    create_person(&db, "alice", "pw", "reader").await;
    let app = api::api_router(db);

    let req = Request::builder()
        .uri("/reader/books")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let reader_token = create_jwt("alice", "reader").unwrap();
    let response = app
        .clone()
        .oneshot(authed_request("GET", "/reader/books", &reader_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Admin satisfies the reader tier
    let admin_token = create_jwt("admin", "admin").unwrap();
    let response = app
        .oneshot(authed_request("GET", "/reader/books", &admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reader_self_assign_and_unlink() {
    let db = setup_test_db().await;
    let alice_id = create_person(&db, "alice", "pw", "reader").await;

    let book = liblend::models::book::ActiveModel {
        name: Set("Dune".to_string()),
        author: Set("Frank Herbert".to_string()),
        created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
        created_by: Set(Some("system".to_string())),
        removed: Set(false),
        ..Default::default()
    };
    let book = book.insert(&db).await.expect("Failed to create book");

    let app = api::api_router(db);
    let token = create_jwt("alice", "reader").unwrap();

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/reader/assign/{}", book.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/books/{}/owner", book.id))
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let owner = body_json(response).await;
    assert_eq!(owner["id"].as_i64(), Some(alice_id));

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/reader/unlink/{}", book.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/books/{}/owner", book.id))
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_api_created_person_can_log_in_with_placeholder() {
    let db = setup_test_db().await;
    let app = api::api_router(db);

    let payload = serde_json::json!({ "name": "bob" });
    let req = Request::builder()
        .uri("/people/new")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The forced placeholder credential works, and the issued role is reader
    let login = serde_json::json!({ "username": "bob", "password": "user" });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&login).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap();
    let claims = decode_jwt(token).unwrap();
    assert_eq!(claims.sub, "bob");
    assert_eq!(claims.role, "reader");
}
