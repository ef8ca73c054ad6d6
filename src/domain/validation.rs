//! Input rules shared by handlers and services.

use validator::ValidateEmail;

use super::DomainError;
use crate::models::book::BookInput;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PRICE: f64 = 999.99;
const MAX_TEXT_LEN: usize = 255;

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Prices fit a five-digit, two-decimal column.
pub fn validate_price(price: f64) -> Result<f64, DomainError> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::Validation(
            "Price must be a positive amount".to_string(),
        ));
    }
    if price > MAX_PRICE {
        return Err(DomainError::Validation(format!(
            "Price must not exceed {:.2}",
            MAX_PRICE
        )));
    }
    Ok((price * 100.0).round() / 100.0)
}

fn required_text(value: &str, field: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(value.to_string())
}

/// Check a listing and return it with trimmed text and a rounded price.
pub fn validate_book_input(input: BookInput) -> Result<BookInput, DomainError> {
    Ok(BookInput {
        title: required_text(&input.title, "Title")?,
        author: required_text(&input.author, "Author")?,
        category: required_text(&input.category, "Category")?,
        price: validate_price(input.price)?,
        description: input
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        condition: input.condition,
    })
}
