//! Login and registration - Pure business logic without HTTP layer

use serde::Serialize;

use crate::auth::{hash_password, verify_password};
use crate::domain::validation::{MIN_PASSWORD_LEN, is_valid_email, normalize_email};
use crate::domain::{DomainError, NewUser, UserRepository};
use crate::models::UserProfile;

/// Message shared by "no such email" and "wrong password" so responses do
/// not reveal which accounts exist.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MISSING_CREDENTIALS: &str = "Email and password are required";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const ACCOUNT_DISABLED: &str = "Account is disabled";

const MAX_USERNAME_LEN: usize = 150;

#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// Check credentials and hand out the user's persistent token.
///
/// Field presence and email syntax are checked before the repository is
/// touched. Unknown email and wrong password fail with the same message.
pub async fn login(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, DomainError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(DomainError::MissingField(MISSING_CREDENTIALS.to_string()));
    }
    if !is_valid_email(&email) {
        return Err(DomainError::Validation(INVALID_EMAIL.to_string()));
    }

    let Some(user) = users.find_by_email(&email).await? else {
        tracing::warn!("Login attempt for unknown email");
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    // An unparseable stored hash counts as a mismatch
    if !verify_password(password, &user.password_hash).unwrap_or(false) {
        tracing::warn!("Password verification failed for user {}", user.id);
        return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    if !user.is_active {
        tracing::warn!("Login attempt for disabled user {}", user.id);
        return Err(DomainError::Unauthorized(ACCOUNT_DISABLED.to_string()));
    }

    let token = users.get_or_create_token(user.id).await?;
    tracing::info!("User {} logged in", user.id);

    Ok(LoginOutcome {
        token,
        user: UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
        },
    })
}

fn validate_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(DomainError::MissingField("Username is required".to_string()));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.chars().count() > MAX_USERNAME_LEN || !username.chars().all(allowed) {
        return Err(DomainError::Validation(format!(
            "Username may contain at most {} letters, digits and @/./+/-/_ characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(username.to_string())
}

/// Create an active account.
pub async fn register(
    users: &dyn UserRepository,
    username: &str,
    email: &str,
    password: &str,
) -> Result<UserProfile, DomainError> {
    let username = validate_username(username)?;
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(DomainError::MissingField(MISSING_CREDENTIALS.to_string()));
    }
    if !is_valid_email(&email) {
        return Err(DomainError::Validation(INVALID_EMAIL.to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let password_hash = hash_password(password).map_err(DomainError::Internal)?;
    let user = users
        .create(NewUser {
            username,
            email,
            password_hash,
        })
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok(UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}
