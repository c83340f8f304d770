use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    // Doubles as the login identity; uniqueness is not enforced by the store
    pub name: String,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: String,
    pub password: String,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub updated_at: Option<String>,
    pub updated_by: Option<String>,
    pub removed_at: Option<String>,
    pub removed_by: Option<String>,
    pub removed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API requests/responses; role and credential never cross this boundary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl PersonDto {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.as_deref().unwrap_or("").is_empty() {
            return Err(DomainError::Validation(
                "name : Name shouldn't be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<Model> for PersonDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: Some(model.name),
            age: model.age,
            email: model.email,
            phone_number: model.phone_number,
        }
    }
}
