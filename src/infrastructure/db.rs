use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if database_url.contains(":memory:") {
        // Every SQLite connection opens its own in-memory database
        options.max_connections(1).min_connections(1);
    }
    let db = Database::connect(options).await?;

    // Cascade and set-null rules below rely on this
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_owned(),
    ))
    .await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create users table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // One persistent token per user
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS auth_tokens (
            "key" TEXT PRIMARY KEY NOT NULL,
            user_id INTEGER NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create books table
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0.0 CHECK (price >= 0 AND price <= 999.99),
            description TEXT,
            category TEXT NOT NULL,
            condition TEXT NOT NULL DEFAULT 'UD' CHECK (condition IN ('NW', 'UD', 'OD')),
            FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS book_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            book_id INTEGER NOT NULL,
            image TEXT NOT NULL,
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            reviewer_id INTEGER NOT NULL,
            book_id INTEGER NOT NULL,
            rating TEXT NOT NULL DEFAULT 'NR'
                CHECK (rating IN ('NR', 'VB', 'BD', 'NL', 'GD', 'VG')),
            comment TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            FOREIGN KEY (reviewer_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Account deletion with a pending exchange is refused in the service
    // layer, for sender and receiver alike.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS exchanges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            status TEXT NOT NULL DEFAULT 'PG' CHECK (status IN ('PG', 'CD')),
            sender_id INTEGER NOT NULL,
            receiver_id INTEGER NOT NULL,
            requested_book_id INTEGER NOT NULL,
            proposed_book_id INTEGER,
            FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (receiver_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (requested_book_id) REFERENCES books(id) ON DELETE CASCADE,
            FOREIGN KEY (proposed_book_id) REFERENCES books(id) ON DELETE SET NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS wishlist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            book_id INTEGER,
            FOREIGN KEY (owner_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE SET NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // A conversation goes away with either participant
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_id INTEGER NOT NULL,
            receiver_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (receiver_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Indexes for the lookups every request makes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_books_owner ON books(owner_id)",
        "CREATE INDEX IF NOT EXISTS idx_book_images_book ON book_images(book_id)",
        "CREATE INDEX IF NOT EXISTS idx_reviews_book ON reviews(book_id)",
        "CREATE INDEX IF NOT EXISTS idx_exchanges_sender ON exchanges(sender_id)",
        "CREATE INDEX IF NOT EXISTS idx_exchanges_receiver ON exchanges(receiver_id)",
        "CREATE INDEX IF NOT EXISTS idx_messages_pair ON messages(sender_id, receiver_id)",
    ] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            statement.to_owned(),
        ))
        .await?;
    }

    Ok(())
}
