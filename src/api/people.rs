use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::auth::Claims;
use crate::error::DomainError;
use crate::models::book::BookDto;
use crate::models::person::PersonDto;
use crate::services::person_service;

use super::acting_identity;

// List all people, removed ones included
#[utoipa::path(
    get,
    path = "/api/people/all",
    responses(
        (status = 200, description = "All person records", body = [PersonDto]),
        (status = 204, description = "The library has no readers yet")
    )
)]
pub async fn all_people(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match person_service::find_all(&db).await {
        Ok(people) if people.is_empty() => DomainError::NoReaders.into_response(),
        Ok(people) => {
            let dtos: Vec<PersonDto> = people.into_iter().map(PersonDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_person(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match person_service::find_one(&db, id).await {
        Ok(person) => Json(PersonDto::from(person)).into_response(),
        Err(e) => e.into_response(),
    }
}

// Create a person. Role and credential are forced by the service no matter
// who calls; anonymous callers stamp the system identity.
#[utoipa::path(
    post,
    path = "/api/people/new",
    request_body = PersonDto,
    responses(
        (status = 200, description = "Person created"),
        (status = 400, description = "Required field missing")
    )
)]
pub async fn create_person(
    State(db): State<DatabaseConnection>,
    claims: Option<Claims>,
    Json(dto): Json<PersonDto>,
) -> impl IntoResponse {
    if let Err(e) = dto.validate() {
        return e.into_response();
    }

    let acting = acting_identity(claims.as_ref());
    match person_service::save(&db, dto, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_person(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    claims: Option<Claims>,
    Json(dto): Json<PersonDto>,
) -> impl IntoResponse {
    if let Err(e) = dto.validate() {
        return e.into_response();
    }

    let acting = acting_identity(claims.as_ref());
    match person_service::update(&db, id, dto, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_person(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
    claims: Option<Claims>,
) -> impl IntoResponse {
    let acting = acting_identity(claims.as_ref());
    match person_service::delete(&db, id, acting).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn revive_person(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match person_service::revive(&db, id).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => e.into_response(),
    }
}

// Books currently held by this person. There is no check that the person
// exists; an unknown id reads as an empty listing.
pub async fn person_books(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match person_service::find_books_in_use(&db, id).await {
        Ok(books) if books.is_empty() => DomainError::NoBooksInUse.into_response(),
        Ok(books) => {
            let dtos: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// Full internal records, role and credential hash included.
// Intentionally unguarded diagnostics.
pub async fn backdoor_people(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match person_service::find_all(&db).await {
        Ok(people) => Json(people).into_response(),
        Err(e) => e.into_response(),
    }
}
