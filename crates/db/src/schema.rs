//! Schema introspection.

use crate::{Dialect, Scalar, Storage, StorageError};

const MYSQL_TABLES: &str =
    "SELECT table_name AS name FROM information_schema.tables WHERE table_schema = DATABASE()";

const SQLITE_TABLES: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'";

/// Names of the user tables in the connected database.
pub async fn table_names(storage: &dyn Storage) -> Result<Vec<String>, StorageError> {
    let statement = match storage.dialect() {
        Dialect::MySql => MYSQL_TABLES,
        Dialect::Sqlite => SQLITE_TABLES,
    };

    storage
        .execute(statement, &[])
        .await?
        .into_rows()?
        .into_iter()
        .map(|row| match row.first() {
            Some(Scalar::Text(name)) => Ok(name.clone()),
            _ => Err(StorageError::MissingColumn("name".to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn lists_user_tables_only() {
        let database = Database::connect("sqlite::memory:").await.unwrap();
        for statement in [
            "CREATE TABLE libro (id INTEGER PRIMARY KEY AUTOINCREMENT, titulo TEXT)",
            "CREATE TABLE autor (id INTEGER PRIMARY KEY, nombre TEXT)",
        ] {
            database.execute(statement, &[]).await.unwrap();
        }

        let mut tables = table_names(&database).await.unwrap();
        tables.sort();

        // AUTOINCREMENT creates sqlite_sequence, which must not leak out.
        assert_eq!(tables, vec!["autor".to_string(), "libro".to_string()]);
    }

    #[tokio::test]
    async fn empty_database_has_no_tables() {
        let database = Database::connect("sqlite::memory:").await.unwrap();
        assert!(table_names(&database).await.unwrap().is_empty());
    }
}
