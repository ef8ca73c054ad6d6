//! Exchange Service - Proposing, completing and withdrawing trades

use sea_orm::*;

use crate::domain::DomainError;
use crate::models::book::Entity as Book;
use crate::models::exchange::{
    self, Entity as Exchange, ExchangeDto, ExchangeInput, ExchangeStatus,
};

/// Propose a trade. The receiver is the owner of the requested book; the
/// optional proposed book must belong to the sender.
pub async fn propose_exchange(
    db: &DatabaseConnection,
    sender_id: i32,
    input: ExchangeInput,
) -> Result<ExchangeDto, DomainError> {
    let requested = Book::find_by_id(input.requested_book)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if requested.owner_id == sender_id {
        return Err(DomainError::Validation(
            "You cannot request your own book".to_string(),
        ));
    }

    if let Some(proposed_id) = input.proposed_book {
        let proposed = Book::find_by_id(proposed_id).one(db).await?;
        match proposed {
            Some(book) if book.owner_id == sender_id => {}
            _ => {
                return Err(DomainError::Validation(
                    "The proposed book must be one of your own".to_string(),
                ));
            }
        }
    }

    let duplicate = Exchange::find()
        .filter(exchange::Column::SenderId.eq(sender_id))
        .filter(exchange::Column::RequestedBookId.eq(requested.id))
        .filter(exchange::Column::Status.eq(ExchangeStatus::Pending))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(DomainError::Conflict(
            "You already have a pending request for this book".to_string(),
        ));
    }

    let proposal = exchange::ActiveModel {
        status: Set(ExchangeStatus::Pending),
        sender_id: Set(sender_id),
        receiver_id: Set(requested.owner_id),
        requested_book_id: Set(requested.id),
        proposed_book_id: Set(input.proposed_book),
        ..Default::default()
    };
    let saved = proposal.insert(db).await?;

    tracing::info!(
        "User {} proposed exchange {} to user {}",
        sender_id,
        saved.id,
        saved.receiver_id
    );
    Ok(ExchangeDto::from(saved))
}

/// Exchanges the user sent or received, by id
pub async fn list_exchanges(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<ExchangeDto>, DomainError> {
    let exchanges = Exchange::find()
        .filter(
            Condition::any()
                .add(exchange::Column::SenderId.eq(user_id))
                .add(exchange::Column::ReceiverId.eq(user_id)),
        )
        .order_by_asc(exchange::Column::Id)
        .all(db)
        .await?;

    Ok(exchanges.into_iter().map(ExchangeDto::from).collect())
}

/// Accept a pending exchange. Only the receiver may do this.
pub async fn complete_exchange(
    db: &DatabaseConnection,
    user_id: i32,
    exchange_id: i32,
) -> Result<ExchangeDto, DomainError> {
    let found = Exchange::find_by_id(exchange_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if found.receiver_id != user_id {
        return Err(DomainError::Forbidden(
            "Only the receiver can complete an exchange".to_string(),
        ));
    }
    if found.status == ExchangeStatus::Completed {
        return Err(DomainError::Validation(
            "Exchange is already completed".to_string(),
        ));
    }

    let mut active: exchange::ActiveModel = found.into();
    active.status = Set(ExchangeStatus::Completed);
    let saved = active.update(db).await?;

    tracing::info!("Exchange {} completed", saved.id);
    Ok(ExchangeDto::from(saved))
}

/// Withdraw (sender) or decline (receiver) an exchange.
pub async fn delete_exchange(
    db: &DatabaseConnection,
    user_id: i32,
    exchange_id: i32,
) -> Result<(), DomainError> {
    let found = Exchange::find_by_id(exchange_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound)?;

    if found.sender_id != user_id && found.receiver_id != user_id {
        return Err(DomainError::Forbidden(
            "You are not part of this exchange".to_string(),
        ));
    }

    Exchange::delete_by_id(found.id).exec(db).await?;
    tracing::info!("Exchange {} removed by user {}", exchange_id, user_id);
    Ok(())
}

/// Whether the user is sender or receiver of any pending exchange
pub async fn has_pending_exchange(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<bool, DomainError> {
    let pending = Exchange::find()
        .filter(exchange::Column::Status.eq(ExchangeStatus::Pending))
        .filter(
            Condition::any()
                .add(exchange::Column::SenderId.eq(user_id))
                .add(exchange::Column::ReceiverId.eq(user_id)),
        )
        .count(db)
        .await?;

    Ok(pending > 0)
}
