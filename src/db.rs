use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Create books table. person_id is the holder reference and deliberately
    // carries no FK constraint: a holder that was later hard-removed from the
    // store must stay representable.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            author TEXT NOT NULL,
            year_of_production INTEGER,
            annotation TEXT,
            created_at TEXT,
            created_by TEXT,
            updated_at TEXT,
            updated_by TEXT,
            removed_at TEXT,
            removed_by TEXT,
            removed INTEGER NOT NULL DEFAULT 0,
            person_id INTEGER
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Create people table. name doubles as the login identity but is not
    // UNIQUE; lookups take the first match.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER,
            email TEXT,
            phone_number TEXT,
            role TEXT NOT NULL DEFAULT 'reader',
            password TEXT NOT NULL,
            created_at TEXT,
            created_by TEXT,
            updated_at TEXT,
            updated_by TEXT,
            removed_at TEXT,
            removed_by TEXT,
            removed INTEGER NOT NULL DEFAULT 0
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Indexes for the holder and login lookups
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_books_person_id ON books(person_id)".to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_people_name ON people(name)".to_owned(),
    ))
    .await?;

    Ok(())
}
