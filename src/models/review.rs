use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum Rating {
    #[default]
    #[sea_orm(string_value = "NR")]
    #[serde(rename = "NR")]
    NoRating,
    #[sea_orm(string_value = "VB")]
    #[serde(rename = "VB")]
    VeryBad,
    #[sea_orm(string_value = "BD")]
    #[serde(rename = "BD")]
    Bad,
    #[sea_orm(string_value = "NL")]
    #[serde(rename = "NL")]
    Normal,
    #[sea_orm(string_value = "GD")]
    #[serde(rename = "GD")]
    Good,
    #[sea_orm(string_value = "VG")]
    #[serde(rename = "VG")]
    VeryGood,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reviewer_id: i32,
    pub book_id: i32,
    pub rating: Rating,
    pub comment: String,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewerId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Reviewer,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviewer.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewDto {
    pub id: i32,
    pub book: i32,
    pub reviewer: i32,
    pub reviewer_username: Option<String>,
    pub rating: Rating,
    pub comment: String,
    pub timestamp: String,
}

impl ReviewDto {
    pub fn new(model: Model, reviewer_username: Option<String>) -> Self {
        Self {
            id: model.id,
            book: model.book_id,
            reviewer: model.reviewer_id,
            reviewer_username,
            rating: model.rating,
            comment: model.comment,
            timestamp: model.timestamp,
        }
    }
}
