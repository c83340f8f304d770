pub mod auth;
pub mod books;
pub mod people;
pub mod reader;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;

use crate::auth::{Claims, Role, SYSTEM_ACTOR, require_role};

/// Identity forwarded into the services for audit stamping.
pub(crate) fn acting_identity(claims: Option<&Claims>) -> &str {
    claims.map(|c| c.sub.as_str()).unwrap_or(SYSTEM_ACTOR)
}

pub fn api_router(db: DatabaseConnection) -> Router {
    // Open surface: no role checks, backdoors included
    let open = Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        // Books
        .route("/books/all", get(books::all_books))
        .route("/books/backdoor", get(books::backdoor_books))
        .route("/books/new", post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/revive", post(books::revive_book))
        .route("/books/:id/owner", get(books::book_owner))
        // People
        .route("/people/all", get(people::all_people))
        .route("/people/backdoor", get(people::backdoor_people))
        .route("/people/new", post(people::create_person))
        .route(
            "/people/:id",
            get(people::get_person)
                .put(people::update_person)
                .delete(people::delete_person),
        )
        .route("/people/:id/revive", post(people::revive_person))
        .route("/people/:id/books", get(people::person_books));

    // Direct record management, admin only
    let admin = Router::new()
        .route("/books/unique", get(books::unique_books))
        .route("/books/:id/duplicate", post(books::duplicate_book))
        .route("/books/:id/assign", post(books::assign_book))
        .route("/books/:id/unlink", patch(books::unlink_book))
        .layer(middleware::from_fn(|req, next| {
            require_role(Role::Admin, req, next)
        }));

    // Self-service, reader or admin
    let reader = Router::new()
        .route("/reader/books", get(reader::my_books))
        .route("/reader/available", get(reader::available_books))
        .route("/reader/assign/:id", post(reader::self_assign))
        .route("/reader/unlink/:id", post(reader::self_unlink))
        .layer(middleware::from_fn(|req, next| {
            require_role(Role::Reader, req, next)
        }));

    open.merge(admin).merge(reader).with_state(db)
}
