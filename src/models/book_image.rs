use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::StoredImage;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub book_id: i32,
    /// File name relative to the media root.
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookImageDto {
    pub id: i32,
    pub book: i32,
    pub url: String,
}

impl From<StoredImage> for BookImageDto {
    fn from(image: StoredImage) -> Self {
        Self {
            url: format!("/image/{}", image.id),
            id: image.id,
            book: image.book_id,
        }
    }
}
