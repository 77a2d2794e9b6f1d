pub mod handlers;
pub mod models;
pub mod repository;

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::{
    routing::{get, put},
    Router,
};
use catalogo_db::Storage;
use catalogo_kernel::{InitCtx, Module};
use serde_json::json;

use super::schema_of;
use models::{Libro, Mensaje, NuevoLibro};
pub use repository::{LibroRepository, RepositoryError};

/// Libro CRUD backed by the shared storage session
pub struct LibrosModule {
    repository: LibroRepository,
}

impl LibrosModule {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            repository: LibroRepository::new(storage),
        }
    }
}

#[async_trait]
impl Module for LibrosModule {
    fn name(&self) -> &'static str {
        "libros"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let tables = self
            .repository
            .table_names()
            .await
            .context("failed to inspect database schema")?;

        if !tables.iter().any(|table| table.eq_ignore_ascii_case("libro")) {
            tracing::warn!(
                module = self.name(),
                database = %ctx.settings.database.redacted_target(),
                "table 'libro' not found; libro requests will fail until it exists"
            );
        }

        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            tables = tables.len(),
            "libros module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/libro", get(handlers::list_libros).post(handlers::create_libro))
            .route(
                "/libro/{id}",
                put(handlers::update_libro).delete(handlers::delete_libro),
            )
            .route("/tables", get(handlers::list_tables))
            .with_state(self.repository.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let id_parameter = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "description": "Libro identifier",
            "schema": { "type": "integer", "format": "int64" }
        });
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let libro_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/NuevoLibro" }
                }
            }
        });
        let libro_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Libro" }
                    }
                }
            })
        };

        Some(json!({
            "paths": {
                "/libro": {
                    "get": {
                        "summary": "Consultar todos los libros",
                        "tags": ["Libros"],
                        "responses": {
                            "200": {
                                "description": "Arreglo con todos los libros",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Libro" }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Error de base de datos")
                        }
                    },
                    "post": {
                        "summary": "Alta de libro",
                        "tags": ["Libros"],
                        "requestBody": libro_body.clone(),
                        "responses": {
                            "201": libro_response("Libro creado con su nuevo ID"),
                            "400": error_response("Cuerpo inválido"),
                            "500": error_response("Error de base de datos")
                        }
                    }
                },
                "/libro/{id}": {
                    "put": {
                        "summary": "Actualizar un libro",
                        "tags": ["Libros"],
                        "parameters": [id_parameter.clone()],
                        "requestBody": libro_body,
                        "responses": {
                            "200": libro_response("Libro actualizado"),
                            "400": error_response("ID o cuerpo inválido"),
                            "404": error_response("Libro no encontrado"),
                            "500": error_response("Error de base de datos")
                        }
                    },
                    "delete": {
                        "summary": "Eliminar un libro",
                        "tags": ["Libros"],
                        "parameters": [id_parameter],
                        "responses": {
                            "200": {
                                "description": "Confirmación de borrado",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Mensaje" }
                                    }
                                }
                            },
                            "400": error_response("ID inválido"),
                            "404": error_response("Libro no encontrado"),
                            "500": error_response("Error de base de datos")
                        }
                    }
                },
                "/tables": {
                    "get": {
                        "summary": "Listar tablas de la base de datos",
                        "tags": ["Esquema"],
                        "responses": {
                            "200": {
                                "description": "Nombres de tablas",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "type": "string" }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Error de base de datos")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Libro": schema_of::<Libro>(),
                    "NuevoLibro": schema_of::<NuevoLibro>(),
                    "Mensaje": schema_of::<Mensaje>()
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "libros module stopped");
        Ok(())
    }
}

/// Create the libros module over the given storage session
pub fn create_module(storage: Arc<dyn Storage>) -> Arc<dyn Module> {
    Arc::new(LibrosModule::new(storage))
}
