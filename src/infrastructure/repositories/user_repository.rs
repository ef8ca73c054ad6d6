//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::domain::{DomainError, NewUser, UserAccount, UserRepository};
use crate::infrastructure::auth::generate_token_key;
use crate::models::auth_token::{self, Entity as AuthTokenEntity};
use crate::models::user::{self, Entity as UserEntity};

fn to_account(model: user::Model) -> UserAccount {
    UserAccount {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        is_active: model.is_active,
    }
}

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_token(&self, user_id: i32) -> Result<Option<String>, DomainError> {
        let token = AuthTokenEntity::find()
            .filter(auth_token::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(token.map(|t| t.key))
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let user = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.map(to_account))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserAccount>, DomainError> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(user.map(to_account))
    }

    async fn find_by_token(&self, key: &str) -> Result<Option<UserAccount>, DomainError> {
        let found = AuthTokenEntity::find_by_id(key.to_owned())
            .find_also_related(UserEntity)
            .one(&self.db)
            .await?;

        Ok(found.and_then(|(_, user)| user).map(to_account))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserAccount, DomainError> {
        let taken = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(new_user.username.as_str()))
                    .add(user::Column::Email.eq(new_user.email.as_str())),
            )
            .one(&self.db)
            .await?;

        if let Some(existing) = taken {
            let field = if existing.username == new_user.username {
                "username"
            } else {
                "email"
            };
            return Err(DomainError::Conflict(format!(
                "A user with that {} already exists",
                field
            )));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let user = user::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user.insert(&self.db).await?;

        Ok(to_account(result))
    }

    async fn get_or_create_token(&self, user_id: i32) -> Result<String, DomainError> {
        if let Some(key) = self.find_token(user_id).await? {
            return Ok(key);
        }

        let token = auth_token::ActiveModel {
            key: Set(generate_token_key()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        match token.insert(&self.db).await {
            Ok(created) => Ok(created.key),
            // A concurrent login for the same user won the unique(user_id) race
            Err(e) => self
                .find_token(user_id)
                .await?
                .ok_or_else(|| DomainError::Database(e.to_string())),
        }
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
