use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{create_jwt, verify_password};
use crate::services::person_service;

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

// Login against person records. The removed flag is not consulted here.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for: {}", payload.username);

    let person = match person_service::find_by_name(&db, &payload.username).await {
        Ok(Some(p)) => p,
        _ => {
            tracing::warn!("Unknown login name: {}", payload.username);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &person.password) {
        Ok(true) => {
            tracing::info!("Password verified for: {}", person.name);
            match create_jwt(&person.name, &person.role) {
                Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
                Err(e) => {
                    tracing::error!("Failed to issue token: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Token creation failed" })),
                    )
                        .into_response()
                }
            }
        }
        _ => {
            tracing::warn!("Password verification failed for: {}", person.name);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}
