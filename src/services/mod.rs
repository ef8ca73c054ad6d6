//! Services Layer
//!
//! This module contains business logic extracted from HTTP handlers.

pub mod account_service;
pub mod auth_service;
pub mod book_service;
pub mod exchange_service;
pub mod message_service;
pub mod review_service;
pub mod wishlist_service;
