//! Person lifecycle - creation with forced role, audit stamping, soft removal

use chrono::Utc;
use sea_orm::*;

use crate::auth::hash_password;
use crate::error::DomainError;
use crate::models::book::{self, Entity as Book};
use crate::models::person::{self, Entity as Person, PersonDto};

// Public creation cannot pick a role or a real credential. Every person
// created through the API starts as a reader with this password.
const PLACEHOLDER_PASSWORD: &str = "user";

/// All person records, store order. Soft-removed records are included.
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<person::Model>, DomainError> {
    Ok(Person::find().all(db).await?)
}

pub async fn find_one(db: &DatabaseConnection, id: i64) -> Result<person::Model, DomainError> {
    Person::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DomainError::PersonNotFound)
}

/// First person whose name matches; names are not unique in the store.
pub async fn find_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<person::Model>, DomainError> {
    Ok(Person::find()
        .filter(person::Column::Name.eq(name))
        .one(db)
        .await?)
}

/// All books whose holder reference points at this person. The books'
/// removed flag is deliberately not consulted.
pub async fn find_books_in_use(
    db: &DatabaseConnection,
    person_id: i64,
) -> Result<Vec<book::Model>, DomainError> {
    Ok(Book::find()
        .filter(book::Column::PersonId.eq(person_id))
        .all(db)
        .await?)
}

/// Persist a new person stamped with the acting identity. Role and
/// credential are forced regardless of the input.
pub async fn save(
    db: &DatabaseConnection,
    dto: PersonDto,
    acting: &str,
) -> Result<person::Model, DomainError> {
    let password = hash_password(PLACEHOLDER_PASSWORD).map_err(DomainError::Database)?;

    let new_person = person::ActiveModel {
        name: Set(dto.name.unwrap_or_default()),
        age: Set(dto.age),
        email: Set(dto.email),
        phone_number: Set(dto.phone_number),
        role: Set("reader".to_string()),
        password: Set(password),
        created_at: Set(Some(Utc::now().to_rfc3339())),
        created_by: Set(Some(acting.to_owned())),
        removed: Set(false),
        ..Default::default()
    };

    Ok(new_person.insert(db).await?)
}

/// Overwrite name, age, email and phone. Role and credential are untouched.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    dto: PersonDto,
    acting: &str,
) -> Result<person::Model, DomainError> {
    let person = find_one(db, id).await?;

    let mut active: person::ActiveModel = person.into();
    active.name = Set(dto.name.unwrap_or_default());
    active.age = Set(dto.age);
    active.email = Set(dto.email);
    active.phone_number = Set(dto.phone_number);
    active.updated_at = Set(Some(Utc::now().to_rfc3339()));
    active.updated_by = Set(Some(acting.to_owned()));

    Ok(active.update(db).await?)
}

/// Soft delete: marker and stamps only, the record stays queryable.
pub async fn delete(
    db: &DatabaseConnection,
    id: i64,
    acting: &str,
) -> Result<person::Model, DomainError> {
    let person = find_one(db, id).await?;

    let mut active: person::ActiveModel = person.into();
    active.removed = Set(true);
    active.removed_at = Set(Some(Utc::now().to_rfc3339()));
    active.removed_by = Set(Some(acting.to_owned()));

    Ok(active.update(db).await?)
}

/// Clear the removed flag. The removal stamps keep their old values.
pub async fn revive(db: &DatabaseConnection, id: i64) -> Result<person::Model, DomainError> {
    let person = find_one(db, id).await?;

    let mut active: person::ActiveModel = person.into();
    active.removed = Set(false);

    Ok(active.update(db).await?)
}
