use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(2))")]
pub enum ExchangeStatus {
    #[sea_orm(string_value = "CD")]
    #[serde(rename = "CD")]
    Completed,
    #[default]
    #[sea_orm(string_value = "PG")]
    #[serde(rename = "PG")]
    Pending,
}

/// A proposed trade: `sender` asks `receiver` for `requested_book`,
/// optionally offering `proposed_book` in return.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exchanges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub status: ExchangeStatus,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub requested_book_id: i32,
    pub proposed_book_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SenderId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceiverId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Receiver,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::RequestedBookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RequestedBook,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::ProposedBookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ProposedBook,
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeInput {
    pub requested_book: i32,
    pub proposed_book: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeDto {
    pub id: i32,
    pub status: ExchangeStatus,
    pub sender: i32,
    pub receiver: i32,
    pub requested_book: i32,
    pub proposed_book: Option<i32>,
}

impl From<Model> for ExchangeDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            status: model.status,
            sender: model.sender_id,
            receiver: model.receiver_id,
            requested_book: model.requested_book_id,
            proposed_book: model.proposed_book_id,
        }
    }
}
