use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::auth::login,
        api::books::all_books,
        api::books::get_book,
        api::books::create_book,
        api::books::book_owner,
        api::people::all_people,
        api::people::create_person,
        // Add other endpoints here as we document them
    ),
    components(
        schemas(
            crate::models::book::BookDto,
            crate::models::person::PersonDto,
        )
    ),
    tags(
        (name = "liblend", description = "Library lending API")
    )
)]
pub struct ApiDoc;
