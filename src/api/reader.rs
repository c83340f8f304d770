use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::auth::Claims;
use crate::models::book::BookDto;
use crate::services::book_service;

// Books the caller currently holds. Callers with no person record get an
// empty list.
pub async fn my_books(
    State(db): State<DatabaseConnection>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match book_service::find_books_held_by(&db, &claims.sub).await {
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// Free and active books, collapsed by (title, author)
pub async fn available_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::find_unique_free(&db).await {
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// Assign a book to the caller. Silently does nothing when the caller's
// name resolves to no person record.
pub async fn self_assign(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match book_service::assign_to_acting_user(&db, id, &claims.sub).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

// Release a book. No check that the caller is the current holder.
pub async fn self_unlink(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match book_service::unlink(&db, id).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}
