//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{BookRepository, DomainError, StoredImage};
use crate::models::book::{
    ActiveModel, Book, BookInput, BookSummary, CatalogEntry, Column, Entity as BookEntity,
};
use crate::models::book_image::{self, Entity as BookImageEntity};

/// Whether title, author or description contains `needle`, ignoring case.
/// `needle` must already be lowercased.
fn entry_matches(entry: &CatalogEntry, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);
    contains(&entry.title)
        || contains(&entry.author)
        || entry.description.as_deref().is_some_and(contains)
}

fn to_stored(model: book_image::Model) -> StoredImage {
    StoredImage {
        id: model.id,
        book_id: model.book_id,
        file_name: model.image,
    }
}

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn list_summaries(&self, limit: u64) -> Result<Vec<BookSummary>, DomainError> {
        let books = BookEntity::find()
            .select_only()
            .columns([Column::Id, Column::Title, Column::Author])
            .order_by_asc(Column::Id)
            .limit(limit)
            .into_model::<BookSummary>()
            .all(&self.db)
            .await?;

        Ok(books)
    }

    async fn search(&self, search: Option<String>) -> Result<Vec<CatalogEntry>, DomainError> {
        let query = BookEntity::find()
            .select_only()
            .columns([
                Column::Id,
                Column::Title,
                Column::Author,
                Column::Description,
            ])
            .order_by_asc(Column::Id);

        let entries = query.into_model::<CatalogEntry>().all(&self.db).await?;

        // Matched here rather than with LIKE, which folds ASCII case only.
        // The term is used verbatim; only an empty one means no filter.
        match search.filter(|term| !term.is_empty()) {
            Some(term) => {
                let needle = term.to_lowercase();
                Ok(entries
                    .into_iter()
                    .filter(|entry| entry_matches(entry, &needle))
                    .collect())
            }
            None => Ok(entries),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;

        Ok(book.map(Book::from))
    }

    async fn create(&self, owner_id: i32, input: BookInput) -> Result<Book, DomainError> {
        let book = ActiveModel {
            owner_id: Set(owner_id),
            title: Set(input.title),
            author: Set(input.author),
            price: Set(input.price),
            description: Set(input.description),
            category: Set(input.category),
            condition: Set(input.condition),
            ..Default::default()
        };

        let result = book.insert(&self.db).await?;

        Ok(Book::from(result))
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut book = existing.into_active_model();
        book.title = Set(input.title);
        book.author = Set(input.author);
        book.price = Set(input.price);
        book.description = Set(input.description);
        book.category = Set(input.category);
        book.condition = Set(input.condition);

        let result = book.update(&self.db).await?;

        Ok(Book::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn find_image(&self, image_id: i32) -> Result<Option<StoredImage>, DomainError> {
        let image = BookImageEntity::find_by_id(image_id).one(&self.db).await?;

        Ok(image.map(to_stored))
    }

    async fn list_images(&self, book_id: i32) -> Result<Vec<StoredImage>, DomainError> {
        let images = BookImageEntity::find()
            .filter(book_image::Column::BookId.eq(book_id))
            .order_by_asc(book_image::Column::Id)
            .all(&self.db)
            .await?;

        Ok(images.into_iter().map(to_stored).collect())
    }

    async fn add_image(
        &self,
        book_id: i32,
        file_name: String,
    ) -> Result<StoredImage, DomainError> {
        let image = book_image::ActiveModel {
            book_id: Set(book_id),
            image: Set(file_name),
            ..Default::default()
        };

        let result = image.insert(&self.db).await?;

        Ok(to_stored(result))
    }
}
