use sea_orm::*;

use crate::auth::hash_password;
use crate::models::book::{self, BookCondition};
use crate::models::user;

/// Demo accounts and listings for local development. Safe to run twice.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let already_seeded = user::Entity::find()
        .filter(user::Column::Username.eq("alice"))
        .one(db)
        .await?
        .is_some();
    if already_seeded {
        tracing::info!("Demo data already present");
        return Ok(());
    }

    let password = hash_password("password123").map_err(DbErr::Custom)?;
    let now = chrono::Utc::now().to_rfc3339();

    let mut owners = Vec::new();
    for (username, email) in [("alice", "alice@example.com"), ("bob", "bob@example.com")] {
        let user = user::ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password.clone()),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };
        owners.push(user.insert(db).await?.id);
    }

    let books = [
        ("Dune", "Frank Herbert", 12.5, "Politics and spice on Arrakis.", "Sci-Fi", BookCondition::Used),
        ("The Hobbit", "J.R.R. Tolkien", 8.0, "There and back again.", "Fantasy", BookCondition::Old),
        ("Foundation", "Isaac Asimov", 15.0, "Psychohistory and the fall of an empire.", "Sci-Fi", BookCondition::New),
        ("Emma", "Jane Austen", 5.0, "A matchmaker in Highbury.", "Classic", BookCondition::Used),
    ];

    for (i, (title, author, price, description, category, condition)) in
        books.into_iter().enumerate()
    {
        let book = book::ActiveModel {
            owner_id: Set(owners[i % owners.len()]),
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            price: Set(price),
            description: Set(Some(description.to_owned())),
            category: Set(category.to_owned()),
            condition: Set(condition),
            ..Default::default()
        };
        book.insert(db).await?;
    }

    Ok(())
}
