use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical state of a listed book, stored as a two-letter code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum BookCondition {
    #[sea_orm(string_value = "NW")]
    #[serde(rename = "NW")]
    New,
    #[default]
    #[sea_orm(string_value = "UD")]
    #[serde(rename = "UD")]
    Used,
    #[sea_orm(string_value = "OD")]
    #[serde(rename = "OD")]
    Old,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub author: String,
    /// Asking price, 0.00 to 999.99.
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
    pub condition: BookCondition,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::book_image::Entity")]
    Images,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::book_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for the book detail page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: i32,
    pub owner: i32,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: String,
    pub condition: BookCondition,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            owner: model.owner_id,
            title: model.title,
            author: model.author,
            price: model.price,
            description: model.description,
            category: model.category,
            condition: model.condition,
        }
    }
}

/// Fields a user supplies when listing or editing a book.
#[derive(Debug, Clone, Deserialize)]
pub struct BookInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub price: f64,
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub condition: BookCondition,
}

/// Row of the home listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sea_orm::FromQueryResult)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
}

/// Row of the catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sea_orm::FromQueryResult)]
pub struct CatalogEntry {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}
