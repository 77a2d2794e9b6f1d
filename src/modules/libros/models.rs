use catalogo_db::{Row, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A persisted book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Libro {
    /// Identifier assigned by the database
    pub id: i64,
    /// Title of the book
    pub titulo: String,
    /// Author of the book
    pub autor: String,
    /// Publication year
    pub anio: i64,
}

impl Libro {
    pub(crate) fn from_row(row: &Row) -> Result<Self, StorageError> {
        Ok(Self {
            id: row.int("id")?,
            titulo: row.text("titulo")?,
            autor: row.text("autor")?,
            anio: row.int("anio")?,
        })
    }

    pub(crate) fn with_id(id: i64, fields: NuevoLibro) -> Self {
        Self {
            id,
            titulo: fields.titulo,
            autor: fields.autor,
            anio: fields.anio,
        }
    }
}

/// The mutable fields of a book, validated and ready to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NuevoLibro {
    /// Title of the book
    pub titulo: String,
    /// Author of the book
    pub autor: String,
    /// Publication year
    pub anio: i64,
}

/// Request body for create and update, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibroPayload {
    pub titulo: Option<String>,
    pub autor: Option<String>,
    pub anio: Option<i64>,
}

impl LibroPayload {
    /// Require every field, reporting all the missing ones at once.
    pub fn validate(self) -> Result<NuevoLibro, ValidationError> {
        let mut missing = Vec::new();
        if self.titulo.is_none() {
            missing.push("titulo");
        }
        if self.autor.is_none() {
            missing.push("autor");
        }
        if self.anio.is_none() {
            missing.push("anio");
        }

        match (self.titulo, self.autor, self.anio) {
            (Some(titulo), Some(autor), Some(anio)) => Ok(NuevoLibro {
                titulo,
                autor,
                anio,
            }),
            _ => Err(ValidationError { missing }),
        }
    }
}

/// A request body lacking required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Confirmation returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Mensaje {
    pub message: String,
}

impl Mensaje {
    pub fn eliminado(id: i64) -> Self {
        Self {
            message: format!("Libro con ID {} eliminado", id),
        }
    }
}
