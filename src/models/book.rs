use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year_of_production: Option<i32>,
    pub annotation: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
    pub removed_at: Option<String>,
    pub removed_by: Option<String>,
    pub removed: bool,
    // Holder reference; no FK so a dangling id stays representable
    pub person_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Logical identity used by the deduplicated listings, not by the store.
    pub fn title_key(&self) -> (&str, &str) {
        (&self.name, &self.author)
    }
}

// DTO for API requests/responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub year_of_production: Option<i32>,
    pub author: Option<String>,
    pub annotation: Option<String>,
    pub person_id: Option<i64>,
}

impl BookDto {
    /// Required-field check. Failures are concatenated as
    /// `<field> : <message>` fragments, one per failing field.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut message = String::new();
        if self.name.as_deref().unwrap_or("").is_empty() {
            message.push_str("name : Title shouldn't be empty");
        }
        if self.author.as_deref().unwrap_or("").is_empty() {
            message.push_str("author : Author shouldn't be empty");
        }
        if message.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(message))
        }
    }
}

impl From<Model> for BookDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: Some(model.name),
            year_of_production: model.year_of_production,
            author: Some(model.author),
            annotation: model.annotation,
            person_id: model.person_id,
        }
    }
}
