//! Repository implementations using SeaORM

mod book_repository;
mod user_repository;

pub use book_repository::SeaOrmBookRepository;
pub use user_repository::SeaOrmUserRepository;
