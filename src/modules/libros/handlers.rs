//! HTTP handlers for the libro resource.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use catalogo_http::error::AppError;
use serde_json::json;

use super::models::{Libro, LibroPayload, Mensaje, NuevoLibro, ValidationError};
use super::repository::{LibroRepository, RepositoryError};

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound(id) => {
                AppError::not_found(format!("Libro con ID {} no encontrado", id))
            }
            RepositoryError::Storage(error) => AppError::Internal(error.into()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        let details = error
            .missing
            .iter()
            .map(|field| json!({"field": field, "error": "required"}))
            .collect();
        AppError::validation(details, error.to_string())
    }
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::bad_request(format!("invalid libro id: {}", rejection.body_text())))
}

fn parse_payload(payload: Result<Json<LibroPayload>, JsonRejection>) -> Result<NuevoLibro, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(payload.validate()?)
}

pub(crate) async fn list_libros(
    State(repository): State<LibroRepository>,
) -> Result<Json<Vec<Libro>>, AppError> {
    Ok(Json(repository.list_all().await?))
}

pub(crate) async fn create_libro(
    State(repository): State<LibroRepository>,
    payload: Result<Json<LibroPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Libro>), AppError> {
    let fields = parse_payload(payload)?;
    let libro = repository.create(fields).await?;
    Ok((StatusCode::CREATED, Json(libro)))
}

pub(crate) async fn update_libro(
    State(repository): State<LibroRepository>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<LibroPayload>, JsonRejection>,
) -> Result<Json<Libro>, AppError> {
    let id = parse_id(id)?;
    let fields = parse_payload(payload)?;
    Ok(Json(repository.update(id, fields).await?))
}

pub(crate) async fn delete_libro(
    State(repository): State<LibroRepository>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Mensaje>, AppError> {
    let id = parse_id(id)?;
    repository.delete(id).await?;
    Ok(Json(Mensaje::eliminado(id)))
}

pub(crate) async fn list_tables(
    State(repository): State<LibroRepository>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(repository.table_names().await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use catalogo_db::Storage;
    use catalogo_kernel::Module;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::modules::libros::LibrosModule;
    use crate::testing;

    fn app(storage: Arc<dyn Storage>) -> Router {
        LibrosModule::new(storage).routes()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn dune() -> Value {
        json!({"titulo": "Dune", "autor": "Herbert", "anio": 1965})
    }

    #[tokio::test]
    async fn create_then_list() {
        let app = app(testing::memory_storage().await);

        let (status, body) = send(&app, "POST", "/libro", Some(dune())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"id": 1, "titulo": "Dune", "autor": "Herbert", "anio": 1965})
        );

        let (status, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": 1, "titulo": "Dune", "autor": "Herbert", "anio": 1965}])
        );
    }

    #[tokio::test]
    async fn update_on_empty_store_is_not_found() {
        let app = app(testing::memory_storage().await);

        let (status, body) = send(&app, "PUT", "/libro/999", Some(dune())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Libro con ID 999 no encontrado");
    }

    #[tokio::test]
    async fn delete_after_create_empties_the_list() {
        let app = app(testing::memory_storage().await);
        send(&app, "POST", "/libro", Some(dune())).await;

        let (status, body) = send(&app, "DELETE", "/libro/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Libro con ID 1 eliminado"}));

        let (status, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn delete_of_missing_id_is_not_found_and_changes_nothing() {
        let app = app(testing::memory_storage().await);
        send(&app, "POST", "/libro", Some(dune())).await;

        for _ in 0..2 {
            let (status, _) = send(&app, "DELETE", "/libro/77", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }

        let (_, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_fields_wholesale() {
        let app = app(testing::memory_storage().await);
        send(&app, "POST", "/libro", Some(dune())).await;

        let replacement = json!({"titulo": "Hijos de Dune", "autor": "F. Herbert", "anio": 1976});
        let (status, body) = send(&app, "PUT", "/libro/1", Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": 1, "titulo": "Hijos de Dune", "autor": "F. Herbert", "anio": 1976})
        );

        let (_, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(
            body,
            json!([{"id": 1, "titulo": "Hijos de Dune", "autor": "F. Herbert", "anio": 1976}])
        );
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_before_storage() {
        let app = app(testing::memory_storage().await);

        let (status, body) = send(&app, "POST", "/libro", Some(json!({"titulo": "Dune"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn mistyped_fields_are_rejected() {
        let app = app(testing::memory_storage().await);

        let body = json!({"titulo": "Dune", "autor": "Herbert", "anio": "mil novecientos"});
        let (status, body) = send(&app, "POST", "/libro", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn update_validates_body_too() {
        let app = app(testing::memory_storage().await);
        send(&app, "POST", "/libro", Some(dune())).await;

        let (status, _) = send(&app, "PUT", "/libro/1", Some(json!({"anio": 2000}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(body[0]["titulo"], "Dune");
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let app = app(testing::memory_storage().await);

        let (status, _) = send(&app, "DELETE", "/libro/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "PUT", "/libro/abc", Some(dune())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn storage_failure_is_internal_error() {
        let app = app(testing::closed_storage().await);

        let (status, body) = send(&app, "GET", "/libro", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "internal_error");

        let (status, _) = send(&app, "POST", "/libro", Some(dune())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&app, "GET", "/tables", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn tables_lists_schema() {
        let app = app(testing::memory_storage().await);

        let (status, body) = send(&app, "GET", "/tables", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().contains(&json!("libro")));
    }
}
