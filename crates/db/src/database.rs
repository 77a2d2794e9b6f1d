//! sqlx-backed [`Storage`] holding a single long-lived session.

use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{Any, AnyPool, Column, Row as _};

use crate::{Mutation, Outcome, Row, Scalar, Storage, StorageError};

/// Leading keywords of statements that produce a result set.
const ROW_RETURNING_KEYWORDS: &[&str] = &["SELECT", "SHOW", "WITH", "PRAGMA", "DESCRIBE", "EXPLAIN"];

/// SQL dialect of the connected engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    /// Resolve the dialect from a connection URL scheme.
    pub fn from_url(url: &str) -> Result<Self, StorageError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(StorageError::UnsupportedUrl(other.to_string())),
        }
    }
}

/// The process-wide storage session.
///
/// The pool is capped at one connection that never idles out, so every
/// statement runs on the same session opened by [`Database::connect`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    dialect: Dialect,
}

impl Database {
    /// Open the session described by `url`.
    pub async fn connect(url: &str) -> Result<Self, StorageError> {
        let dialect = Dialect::from_url(url)?;
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await
            .map_err(StorageError::Connect)?;

        tracing::info!(target: "catalogo-db", ?dialect, "database session established");

        Ok(Self { pool, dialect })
    }

    /// Release the session. Statements issued afterwards fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "catalogo-db", "database session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[async_trait]
impl Storage for Database {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn execute(&self, statement: &str, params: &[Scalar]) -> Result<Outcome, StorageError> {
        tracing::debug!(
            target: "catalogo-db",
            statement,
            params = params.len(),
            "executing statement"
        );

        let mut query = sqlx::query::<Any>(statement);
        for param in params {
            query = match param {
                Scalar::Null => query.bind(None::<i64>),
                Scalar::Int(value) => query.bind(*value),
                Scalar::Text(value) => query.bind(value.clone()),
            };
        }

        if returns_rows(statement) {
            let rows = query.fetch_all(&self.pool).await?;
            let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
            Ok(Outcome::Rows(rows))
        } else {
            let result = query.execute(&self.pool).await?;
            Ok(Outcome::Mutation(Mutation {
                affected_rows: result.rows_affected(),
                inserted_id: result.last_insert_id(),
            }))
        }
    }
}

fn returns_rows(statement: &str) -> bool {
    let keyword = statement
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default();

    ROW_RETURNING_KEYWORDS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(keyword))
}

fn decode_row(row: &AnyRow) -> Result<Row, StorageError> {
    let mut columns = Vec::with_capacity(row.columns().len());

    for column in row.columns() {
        let ordinal = column.ordinal();
        let value = if let Ok(value) = row.try_get::<Option<i64>, _>(ordinal) {
            value.map_or(Scalar::Null, Scalar::Int)
        } else if let Ok(value) = row.try_get::<Option<String>, _>(ordinal) {
            value.map_or(Scalar::Null, Scalar::Text)
        } else if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(ordinal) {
            // MySQL TEXT columns reach the Any driver as blobs
            match value.map(String::from_utf8).transpose() {
                Ok(text) => text.map_or(Scalar::Null, Scalar::Text),
                Err(_) => {
                    return Err(StorageError::Decode {
                        column: column.name().to_string(),
                    })
                }
            }
        } else {
            return Err(StorageError::Decode {
                column: column.name().to_string(),
            });
        };

        columns.push((column.name().to_string(), value));
    }

    Ok(Row::new(columns))
}
