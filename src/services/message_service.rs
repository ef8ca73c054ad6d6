//! Message Service - Direct messages between users

use sea_orm::*;

use crate::domain::DomainError;
use crate::models::message::{self, Entity as Message, MessageDto, MessageInput};
use crate::models::user::Entity as User;

const MAX_MESSAGE_LEN: usize = 2000;

pub async fn send_message(
    db: &DatabaseConnection,
    sender_id: i32,
    input: MessageInput,
) -> Result<MessageDto, DomainError> {
    let content = input.content.trim().to_string();
    if content.is_empty() {
        return Err(DomainError::MissingField("Content is required".to_string()));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(DomainError::Validation(format!(
            "Messages are limited to {} characters",
            MAX_MESSAGE_LEN
        )));
    }
    if input.receiver == sender_id {
        return Err(DomainError::Validation(
            "You cannot message yourself".to_string(),
        ));
    }

    User::find_by_id(input.receiver)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    let outgoing = message::ActiveModel {
        sender_id: Set(sender_id),
        receiver_id: Set(input.receiver),
        content: Set(content),
        timestamp: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    let saved = outgoing.insert(db).await?;

    Ok(MessageDto::from(saved))
}

/// Messages exchanged between two users, oldest first
pub async fn conversation(
    db: &DatabaseConnection,
    user_id: i32,
    other_id: i32,
) -> Result<Vec<MessageDto>, DomainError> {
    let between = |a: i32, b: i32| {
        Condition::all()
            .add(message::Column::SenderId.eq(a))
            .add(message::Column::ReceiverId.eq(b))
    };

    let messages = Message::find()
        .filter(
            Condition::any()
                .add(between(user_id, other_id))
                .add(between(other_id, user_id)),
        )
        .order_by_asc(message::Column::Timestamp)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await?;

    Ok(messages.into_iter().map(MessageDto::from).collect())
}
