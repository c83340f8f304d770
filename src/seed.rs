use sea_orm::*;

use crate::auth::{SYSTEM_ACTOR, hash_password};
use crate::models::{book, person};

/// Demo/bootstrap data. Privileged accounts only exist through seeding;
/// the public creation paths force role=reader.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    seed_person(db, "admin", "admin", "admin").await?;
    seed_person(db, "reader", "user", "reader").await?;

    seed_book(db, "Dune", "Frank Herbert", Some(1965), Some("A spice planet story.")).await?;
    seed_book(db, "Foundation", "Isaac Asimov", Some(1951), None).await?;
    seed_book(db, "The Hobbit", "J.R.R. Tolkien", Some(1937), None).await?;

    Ok(())
}

// Idempotent by name lookup; the people table has no unique constraint
async fn seed_person(
    db: &DatabaseConnection,
    name: &str,
    password: &str,
    role: &str,
) -> Result<(), DbErr> {
    let existing = person::Entity::find()
        .filter(person::Column::Name.eq(name))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(DbErr::Custom)?;

    let new_person = person::ActiveModel {
        name: Set(name.to_owned()),
        role: Set(role.to_owned()),
        password: Set(password_hash),
        created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
        created_by: Set(Some(SYSTEM_ACTOR.to_owned())),
        removed: Set(false),
        ..Default::default()
    };
    new_person.insert(db).await?;

    Ok(())
}

async fn seed_book(
    db: &DatabaseConnection,
    name: &str,
    author: &str,
    year: Option<i32>,
    annotation: Option<&str>,
) -> Result<(), DbErr> {
    let existing = book::Entity::find()
        .filter(book::Column::Name.eq(name))
        .filter(book::Column::Author.eq(author))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let new_book = book::ActiveModel {
        name: Set(name.to_owned()),
        author: Set(author.to_owned()),
        year_of_production: Set(year),
        annotation: Set(annotation.map(str::to_owned)),
        created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
        created_by: Set(Some(SYSTEM_ACTOR.to_owned())),
        removed: Set(false),
        ..Default::default()
    };
    new_book.insert(db).await?;

    Ok(())
}
