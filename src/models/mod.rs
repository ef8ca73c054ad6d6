pub mod auth_token;
pub mod book;
pub mod book_image;
pub mod exchange;
pub mod message;
pub mod review;
pub mod user;
pub mod wishlist;

pub use book::{Book, BookCondition};
pub use user::UserProfile;
