//! Book lifecycle - audit stamping, soft removal, holder assignment

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::*;

use crate::error::DomainError;
use crate::models::book::{self, BookDto, Entity as Book};
use crate::models::person::{self, Entity as Person};

/// All book records, store order. Soft-removed records are included.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<book::Model>, DomainError> {
    Ok(Book::find().all(db).await?)
}

/// Books collapsed by (title, author).
pub async fn find_unique(db: &DatabaseConnection) -> Result<Vec<book::Model>, DomainError> {
    Ok(dedup_by_title(find_all(db).await?))
}

/// Books collapsed by (title, author), restricted to active records with
/// no current holder.
pub async fn find_unique_free(db: &DatabaseConnection) -> Result<Vec<book::Model>, DomainError> {
    let books = Book::find()
        .filter(book::Column::Removed.eq(false))
        .filter(book::Column::PersonId.is_null())
        .all(db)
        .await?;
    Ok(dedup_by_title(books))
}

fn dedup_by_title(books: Vec<book::Model>) -> Vec<book::Model> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    books
        .into_iter()
        .filter(|b| {
            let (name, author) = b.title_key();
            seen.insert((name.to_owned(), author.to_owned()))
        })
        .collect()
}

pub async fn find_one(db: &DatabaseConnection, id: i64) -> Result<book::Model, DomainError> {
    Book::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::BookNotFound)
}

/// The person currently holding the book. `Ok(None)` means the book is free.
/// A holder id that no longer resolves surfaces as `PersonNotFound`.
pub async fn find_owner(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<person::Model>, DomainError> {
    let book = find_one(db, id).await?;

    let Some(person_id) = book.person_id else {
        return Ok(None);
    };

    let person = Person::find_by_id(person_id)
        .one(db)
        .await?
        .ok_or(DomainError::PersonNotFound)?;

    Ok(Some(person))
}

/// All books whose holder is the person with this login name. An unknown
/// name yields an empty list, not an error.
pub async fn find_books_held_by(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Vec<book::Model>, DomainError> {
    let person = Person::find()
        .filter(person::Column::Name.eq(username))
        .one(db)
        .await?;

    let Some(person) = person else {
        return Ok(Vec::new());
    };

    Ok(Book::find()
        .filter(book::Column::PersonId.eq(person.id))
        .all(db)
        .await?)
}

/// Persist a new book stamped with the acting identity.
pub async fn save(
    db: &DatabaseConnection,
    dto: BookDto,
    acting: &str,
) -> Result<book::Model, DomainError> {
    let new_book = book::ActiveModel {
        name: Set(dto.name.unwrap_or_default()),
        author: Set(dto.author.unwrap_or_default()),
        year_of_production: Set(dto.year_of_production),
        annotation: Set(dto.annotation),
        person_id: Set(dto.person_id),
        created_at: Set(Some(Utc::now().to_rfc3339())),
        created_by: Set(Some(acting.to_owned())),
        removed: Set(false),
        ..Default::default()
    };

    Ok(new_book.insert(db).await?)
}

/// Overwrite title, year, author, annotation and the holder reference.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    dto: BookDto,
    acting: &str,
) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let mut active: book::ActiveModel = book.into();
    active.name = Set(dto.name.unwrap_or_default());
    active.author = Set(dto.author.unwrap_or_default());
    active.year_of_production = Set(dto.year_of_production);
    active.annotation = Set(dto.annotation);
    active.person_id = Set(dto.person_id);
    active.updated_at = Set(Some(Utc::now().to_rfc3339()));
    active.updated_by = Set(Some(acting.to_owned()));

    Ok(active.update(db).await?)
}

/// Soft delete: marker and stamps only. The record stays queryable and the
/// holder reference stays in place.
pub async fn delete(
    db: &DatabaseConnection,
    id: i64,
    acting: &str,
) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let mut active: book::ActiveModel = book.into();
    active.removed = Set(true);
    active.removed_at = Set(Some(Utc::now().to_rfc3339()));
    active.removed_by = Set(Some(acting.to_owned()));

    Ok(active.update(db).await?)
}

/// Clear the removed flag. The removal stamps keep their old values.
pub async fn revive(db: &DatabaseConnection, id: i64) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let mut active: book::ActiveModel = book.into();
    active.removed = Set(false);

    Ok(active.update(db).await?)
}

/// Clear the holder reference.
pub async fn unlink(db: &DatabaseConnection, id: i64) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let mut active: book::ActiveModel = book.into();
    active.person_id = Set(None);

    Ok(active.update(db).await?)
}

/// Point the holder reference at a person. Last write wins: no check that
/// the book is currently free or active.
pub async fn assign_to_person(
    db: &DatabaseConnection,
    id: i64,
    person_id: i64,
) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let mut active: book::ActiveModel = book.into();
    active.person_id = Set(Some(person_id));

    Ok(active.update(db).await?)
}

/// Assign the book to the person whose login name matches the acting
/// identity. The book must exist; an identity with no person record makes
/// the assignment itself a silent no-op.
pub async fn assign_to_acting_user(
    db: &DatabaseConnection,
    id: i64,
    username: &str,
) -> Result<(), DomainError> {
    let book = find_one(db, id).await?;

    let person = Person::find()
        .filter(person::Column::Name.eq(username))
        .one(db)
        .await?;

    if let Some(person) = person {
        let mut active: book::ActiveModel = book.into();
        active.person_id = Set(Some(person.id));
        active.update(db).await?;
    }

    Ok(())
}

/// Create a fresh copy of a book: title, author, year and annotation carry
/// over, the holder reference never does.
pub async fn duplicate(
    db: &DatabaseConnection,
    id: i64,
    acting: &str,
) -> Result<book::Model, DomainError> {
    let book = find_one(db, id).await?;

    let copy = book::ActiveModel {
        name: Set(book.name),
        author: Set(book.author),
        year_of_production: Set(book.year_of_production),
        annotation: Set(book.annotation),
        created_at: Set(Some(Utc::now().to_rfc3339())),
        created_by: Set(Some(acting.to_owned())),
        removed: Set(false),
        ..Default::default()
    };

    Ok(copy.insert(db).await?)
}
