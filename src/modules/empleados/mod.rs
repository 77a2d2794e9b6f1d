use async_trait::async_trait;
use axum::{http::StatusCode, routing::get, Json, Router};
use catalogo_kernel::{InitCtx, Module};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::schema_of;

/// Example employee; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Empleado {
    pub id: i64,
    pub nombre: String,
    pub edad: u32,
}

/// Greeting returned by the sample endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Saludo {
    pub mensaje: String,
}

/// Demo routes answering with fixed data
pub struct EmpleadosModule;

impl EmpleadosModule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for EmpleadosModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for EmpleadosModule {
    fn name(&self) -> &'static str {
        "empleados"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "empleados module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(bienvenida))
            .route("/empleado", get(list_empleados).post(create_empleado))
            .route("/api/saludo", get(saludo))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "Bienvenida",
                        "tags": ["Empleados"],
                        "responses": {
                            "200": {
                                "description": "Mensaje de bienvenida",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                },
                "/empleado": {
                    "get": {
                        "summary": "Consultar todos los empleados",
                        "tags": ["Empleados"],
                        "responses": {
                            "200": {
                                "description": "Regresa un arreglo de objetos con los empleados.",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Empleado" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Alta de empleados",
                        "tags": ["Empleados"],
                        "responses": {
                            "201": {
                                "description": "Regresa un objeto con el resultado de la operación de alta",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Empleado" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/api/saludo": {
                    "get": {
                        "summary": "Endpoint de ejemplo",
                        "tags": ["Empleados"],
                        "responses": {
                            "200": {
                                "description": "Saludo",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Saludo" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Empleado": schema_of::<Empleado>(),
                    "Saludo": schema_of::<Saludo>()
                }
            }
        }))
    }
}

async fn bienvenida() -> &'static str {
    "Bienvenido a la API de Empleados"
}

/// List empleados (fixed sample data)
async fn list_empleados() -> Json<Vec<Empleado>> {
    Json(vec![Empleado {
        id: 1,
        nombre: "Juan Pérez".to_string(),
        edad: 30,
    }])
}

/// Create empleado; the body is ignored and a fixed record returned
async fn create_empleado() -> (StatusCode, Json<Empleado>) {
    (
        StatusCode::CREATED,
        Json(Empleado {
            id: 2,
            nombre: "Ana Gómez".to_string(),
            edad: 25,
        }),
    )
}

async fn saludo() -> Json<Saludo> {
    Json(Saludo {
        mensaje: "Hola, mundo!".to_string(),
    })
}

/// Create a new instance of the empleados module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(EmpleadosModule::new())
}
