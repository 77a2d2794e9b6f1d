//! Router builder for the Catálogo HTTP server

use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::{Timestamp, Uuid};

use catalogo_kernel::ModuleRegistry;

/// Descriptive metadata for the published API description
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    /// Base URL advertised under `servers`
    pub server_url: String,
}

impl ApiInfo {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            title: "API Catálogo".to_string(),
            version: "1.0.0".to_string(),
            description: "API para gestionar libros y empleados".to_string(),
            server_url: server_url.into(),
        }
    }
}

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Merge a module's router; module routes carry absolute paths
    pub fn mount_module(mut self, module_router: Router) -> Self {
        self.router = self.router.merge(module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Add request ID middleware; the id is echoed on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Publish the API description assembled from every module's fragment
    pub fn with_openapi(mut self, registry: &ModuleRegistry, info: &ApiInfo) -> Self {
        let openapi_spec = assemble_openapi(registry, info);

        // Swagger UI at /swagger-ui loads the merged document as-is
        self.router = self.router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .external_url_unchecked("/api-docs/openapi.json", openapi_spec.clone()),
        );

        // Also serve the raw JSON spec at /docs/openapi.json for external consumers
        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge module fragments into a single OpenAPI 3.1 document
pub fn assemble_openapi(registry: &ModuleRegistry, info: &ApiInfo) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.1.0",
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
            "license": {
                "name": "MIT",
                "url": "https://opensource.org/licenses/MIT"
            },
            "contact": {
                "name": "Soporte",
                "url": "https://soporte.ejemplo.com"
            }
        },
        "servers": [
            {
                "url": info.server_url,
                "description": "Servidor local"
            }
        ],
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    // Common error response schema
    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "message": { "type": "string" },
                    "details": { "type": "array", "items": {} },
                    "trace_id": { "type": "string" },
                    "timestamp": { "type": "string" }
                },
                "required": ["code", "message", "trace_id", "timestamp"]
            }
        },
        "required": ["error"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string" }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                openapi_spec["paths"][path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
    };
    use catalogo_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct DocumentedModule;

    #[async_trait::async_trait]
    impl Module for DocumentedModule {
        fn name(&self) -> &'static str {
            "documented"
        }

        fn routes(&self) -> Router {
            Router::new().route("/recurso", get(|| async { "recurso" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": { "/recurso": { "get": { "summary": "Recurso" } } },
                "components": { "schemas": { "Recurso": { "type": "object" } } }
            }))
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(DocumentedModule));
        registry
    }

    async fn get_request(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_module_routes_are_merged_at_their_own_paths() {
        let router = RouterBuilder::new()
            .mount_module(DocumentedModule.routes())
            .build();

        let response = get_request(router, "/recurso").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_tracing()
            .with_cors()
            .with_request_id()
            .with_timeout(5000)
            .build();

        let response = get_request(router, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let request_id = response.headers().get("x-request-id").unwrap();
        assert!(Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[test]
    fn test_openapi_merges_module_fragments() {
        let spec = assemble_openapi(&registry(), &ApiInfo::new("http://api.ejemplo.com"));

        assert_eq!(spec["openapi"], "3.1.0");
        assert_eq!(spec["info"]["license"]["name"], "MIT");
        assert_eq!(spec["servers"][0]["url"], "http://api.ejemplo.com");
        assert!(spec["paths"]["/healthz"].is_object());
        assert_eq!(spec["paths"]["/recurso"]["get"]["summary"], "Recurso");
        assert!(spec["components"]["schemas"]["Recurso"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }

    #[tokio::test]
    async fn test_raw_openapi_document_is_served() {
        let router = RouterBuilder::new()
            .with_openapi(&registry(), &ApiInfo::new("http://localhost:8083"))
            .build();

        let response = get_request(router, "/docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let spec: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(spec["paths"]["/recurso"].is_object());
    }

    #[tokio::test]
    async fn test_swagger_ui_document_carries_module_paths() {
        let router = RouterBuilder::new()
            .with_openapi(&registry(), &ApiInfo::new("http://localhost:8083"))
            .build();

        let response = get_request(router, "/api-docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let spec: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(spec["paths"]["/recurso"]["get"]["summary"], "Recurso");
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
