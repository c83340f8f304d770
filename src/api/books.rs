use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::Claims;
use crate::error::DomainError;
use crate::models::book::BookDto;
use crate::models::person::PersonDto;
use crate::services::book_service;

use super::acting_identity;

// List all books, removed ones included
#[utoipa::path(
    get,
    path = "/api/books/all",
    responses(
        (status = 200, description = "All book records", body = [BookDto]),
        (status = 204, description = "The library has no books yet")
    )
)]
pub async fn all_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::find_all(&db).await {
        Ok(books) if books.is_empty() => DomainError::NoBooks.into_response(),
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match book_service::find_one(&db, id).await {
        Ok(book) => Json(BookDto::from(book)).into_response(),
        Err(e) => e.into_response(),
    }
}

// Create a book. Anonymous callers stamp the system identity.
#[utoipa::path(
    post,
    path = "/api/books/new",
    request_body = BookDto,
    responses(
        (status = 200, description = "Book created"),
        (status = 400, description = "Required field missing")
    )
)]
pub async fn create_book(
    State(db): State<DatabaseConnection>,
    claims: Option<Claims>,
    Json(dto): Json<BookDto>,
) -> impl IntoResponse {
    if let Err(e) = dto.validate() {
        return e.into_response();
    }

    let acting = acting_identity(claims.as_ref());
    match book_service::save(&db, dto, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    claims: Option<Claims>,
    Json(dto): Json<BookDto>,
) -> impl IntoResponse {
    if let Err(e) = dto.validate() {
        return e.into_response();
    }

    let acting = acting_identity(claims.as_ref());
    match book_service::update(&db, id, dto, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    claims: Option<Claims>,
) -> impl IntoResponse {
    let acting = acting_identity(claims.as_ref());
    match book_service::delete(&db, id, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn revive_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match book_service::revive(&db, id).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

// Current holder of a book
#[utoipa::path(
    get,
    path = "/api/books/{id}/owner",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The current holder", body = PersonDto),
        (status = 204, description = "The book is free"),
        (status = 404, description = "Book or holder not found")
    )
)]
pub async fn book_owner(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match book_service::find_owner(&db, id).await {
        Ok(Some(person)) => Json(PersonDto::from(person)).into_response(),
        Ok(None) => DomainError::FreeBook.into_response(),
        Err(e) => e.into_response(),
    }
}

// Full internal records, audit fields and removed flag included.
// Intentionally unguarded diagnostics.
pub async fn backdoor_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::find_all(&db).await {
        Ok(books) => Json(books).into_response(),
        Err(e) => e.into_response(),
    }
}

// ---- Admin-gated record management ----

pub async fn unique_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::find_unique(&db).await {
        Ok(books) if books.is_empty() => DomainError::NoBooks.into_response(),
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn duplicate_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    match book_service::duplicate(&db, id, &claims.sub).await {
        Ok(book) => Json(BookDto::from(book)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub person_id: i64,
}

pub async fn assign_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    Json(payload): Json<AssignRequest>,
) -> impl IntoResponse {
    match book_service::assign_to_person(&db, id, payload.person_id).await {
        Ok(book) => Json(BookDto::from(book)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn unlink_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match book_service::unlink(&db, id).await {
        Ok(book) => Json(BookDto::from(book)).into_response(),
        Err(e) => e.into_response(),
    }
}
