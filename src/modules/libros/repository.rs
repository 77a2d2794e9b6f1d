//! Translation of libro CRUD intents into single SQL statements.

use std::sync::Arc;

use catalogo_db::{Scalar, Storage, StorageError};
use thiserror::Error;

use super::models::{Libro, NuevoLibro};

const SELECT_ALL: &str = "SELECT id, titulo, autor, anio FROM libro";
const INSERT: &str = "INSERT INTO libro (titulo, autor, anio) VALUES (?, ?, ?)";
const UPDATE: &str = "UPDATE libro SET titulo = ?, autor = ?, anio = ? WHERE id = ?";
const DELETE: &str = "DELETE FROM libro WHERE id = ?";

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("libro {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Repository over the `libro` table.
///
/// Each operation issues exactly one statement; concurrent writers to the same
/// row are ordered by the database alone.
#[derive(Clone)]
pub struct LibroRepository {
    storage: Arc<dyn Storage>,
}

impl LibroRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Every stored libro, in whatever order the database returns them.
    pub async fn list_all(&self) -> Result<Vec<Libro>, RepositoryError> {
        let rows = self.storage.execute(SELECT_ALL, &[]).await?.into_rows()?;

        let libros = rows
            .iter()
            .map(Libro::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(libros)
    }

    pub async fn create(&self, fields: NuevoLibro) -> Result<Libro, RepositoryError> {
        let mutation = self
            .storage
            .execute(INSERT, &field_params(&fields))
            .await?
            .into_mutation()?;

        let id = mutation.inserted_id.ok_or(StorageError::MissingInsertId)?;
        tracing::info!(id, "libro created");

        Ok(Libro::with_id(id, fields))
    }

    /// Replace all fields of libro `id`.
    pub async fn update(&self, id: i64, fields: NuevoLibro) -> Result<Libro, RepositoryError> {
        let mut params = field_params(&fields);
        params.push(Scalar::Int(id));

        let mutation = self.storage.execute(UPDATE, &params).await?.into_mutation()?;
        if mutation.affected_rows == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::info!(id, "libro updated");

        Ok(Libro::with_id(id, fields))
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mutation = self
            .storage
            .execute(DELETE, &[Scalar::Int(id)])
            .await?
            .into_mutation()?;
        if mutation.affected_rows == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        tracing::info!(id, "libro deleted");

        Ok(())
    }

    /// Names of all tables in the connected database.
    pub async fn table_names(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(catalogo_db::table_names(self.storage.as_ref()).await?)
    }
}

fn field_params(fields: &NuevoLibro) -> Vec<Scalar> {
    vec![
        Scalar::from(fields.titulo.as_str()),
        Scalar::from(fields.autor.as_str()),
        Scalar::Int(fields.anio),
    ]
}
