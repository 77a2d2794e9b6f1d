//! Shared fixtures for unit tests.

use std::sync::Arc;

use catalogo_db::{Database, Storage};

const CREATE_LIBRO_TABLE: &str = "CREATE TABLE libro (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    autor TEXT NOT NULL,
    anio INTEGER NOT NULL
)";

/// An in-memory SQLite session with an empty `libro` table.
pub(crate) async fn memory_storage() -> Arc<Database> {
    let database = Database::connect("sqlite::memory:").await.unwrap();
    database.execute(CREATE_LIBRO_TABLE, &[]).await.unwrap();
    Arc::new(database)
}

/// A session that has already been released; every statement fails.
pub(crate) async fn closed_storage() -> Arc<Database> {
    let database = memory_storage().await;
    database.close().await;
    database
}
